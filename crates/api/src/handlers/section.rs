//! Handlers for an event's microsite sections.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vowly_core::plans::{ensure_feature, Feature, Plan};
use vowly_core::sections::{
    resolve_sections, validate_content, ResolvedSection, Section, SectionOverride,
};
use vowly_core::types::DbId;
use vowly_db::models::section::UpsertSection;
use vowly_db::repositories::SectionRepo;
use vowly_db::DbPool;

use crate::error::AppResult;
use crate::handlers::event::load_owned_event;
use crate::handlers::me::organizer_plan;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{id}/sections
///
/// Every section with defaults merged in, hidden and unavailable ones
/// included, in page order.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let plan = organizer_plan(&state, &user).await?;
    let sections = resolved_sections(&state.pool, event.id, plan).await?;
    Ok(Json(DataResponse { data: sections }))
}

/// PUT /api/v1/events/{id}/sections/{section}
///
/// Upsert visibility, order, and content. Content overrides need
/// [`Feature::SectionContent`]. Responds with the full resolved list.
pub async fn upsert(
    State(state): State<AppState>,
    user: AuthUser,
    Path((event_id, section)): Path<(DbId, String)>,
    Json(input): Json<UpsertSection>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let section = Section::from_str_db(&section)?;
    let plan = organizer_plan(&state, &user).await?;

    if let Some(content) = &input.content {
        ensure_feature(plan, Feature::SectionContent)?;
        validate_content(content)?;
    }

    SectionRepo::upsert(&state.pool, event.id, section.as_str(), &input).await?;
    tracing::info!(event_id = %event.id, section = section.as_str(), "Section updated");

    let sections = resolved_sections(&state.pool, event.id, plan).await?;
    Ok(Json(DataResponse { data: sections }))
}

/// DELETE /api/v1/events/{id}/sections/{section}
///
/// Drop the override so the section reverts to its defaults. Idempotent.
pub async fn reset(
    State(state): State<AppState>,
    user: AuthUser,
    Path((event_id, section)): Path<(DbId, String)>,
) -> AppResult<StatusCode> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let section = Section::from_str_db(&section)?;
    if SectionRepo::reset(&state.pool, event.id, section.as_str()).await? {
        tracing::info!(event_id = %event.id, section = section.as_str(), "Section reset");
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Stored overrides for `event_id`, converted to core types.
pub(crate) async fn section_overrides(
    pool: &DbPool,
    event_id: DbId,
) -> AppResult<Vec<SectionOverride>> {
    let overrides = SectionRepo::list_for_event(pool, event_id)
        .await?
        .iter()
        .map(|row| row.to_override())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(overrides)
}

/// Stored overrides for `event_id` resolved against `plan`.
async fn resolved_sections(
    pool: &DbPool,
    event_id: DbId,
    plan: Plan,
) -> AppResult<Vec<ResolvedSection>> {
    let overrides = section_overrides(pool, event_id).await?;
    Ok(resolve_sections(&overrides, plan))
}
