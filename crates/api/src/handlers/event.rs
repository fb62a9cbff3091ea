//! Handlers for the `/events` resource.
//!
//! Every lookup is scoped to the authenticated organizer; someone else's
//! event is indistinguishable from a missing one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vowly_core::error::CoreError;
use vowly_core::types::DbId;
use vowly_core::www_id;
use vowly_db::models::event::{CreateEvent, Event, UpdateEvent};
use vowly_db::repositories::EventRepo;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::handlers::me::load_organizer;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of an event title or partner name.
const MAX_NAME_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/events
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list_for_organizer(&state.pool, user.organizer_id).await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /api/v1/events
///
/// Create an event with a freshly generated public code. Collisions on the
/// code are retried a bounded number of times.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    require_text("title", &input.title)?;
    require_text("partner_one", &input.partner_one)?;
    require_text("partner_two", &input.partner_two)?;

    let organizer = load_organizer(&state, &user).await?;

    for attempt in 1..=www_id::MAX_GENERATION_ATTEMPTS {
        let code = www_id::generate();
        match EventRepo::create(&state.pool, organizer.id, &code, &input).await {
            Ok(event) => {
                tracing::info!(
                    event_id = %event.id,
                    www_id = %event.www_id,
                    organizer_id = %organizer.id,
                    "Event created"
                );
                return Ok((StatusCode::CREATED, Json(DataResponse { data: event })));
            }
            Err(err) if is_unique_violation(&err, "uq_events_www_id") => {
                tracing::debug!(attempt, www_id = %code, "Event code collision, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(AppError::InternalError(
        "Could not allocate a unique event code".into(),
    ))
}

/// GET /api/v1/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, id).await?;
    Ok(Json(DataResponse { data: event }))
}

/// PUT /api/v1/events/{id}
///
/// Patch an event. The public code is immutable; publishing is a plain
/// `is_published` toggle.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<impl IntoResponse> {
    for (field, value) in [
        ("title", &input.title),
        ("partner_one", &input.partner_one),
        ("partner_two", &input.partner_two),
    ] {
        if let Some(value) = value {
            require_text(field, value)?;
        }
    }

    let event = EventRepo::update(&state.pool, id, user.organizer_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    tracing::info!(event_id = %id, is_published = event.is_published, "Event updated");
    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/events/{id}
///
/// Cascades to questions, guests, answers, sections, and media rows.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = EventRepo::delete(&state.pool, id, user.organizer_id).await?;
    if deleted {
        tracing::info!(event_id = %id, "Event deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Event", id }))
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load an event owned by the authenticated organizer, or 404.
pub(crate) async fn load_owned_event(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Event> {
    EventRepo::find_owned(&state.pool, id, user.organizer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))
}

/// Reject blank or overlong free-text fields.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn require_text_rejects_blank() {
        assert_matches!(require_text("title", "   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn require_text_rejects_overlong() {
        let long = "a".repeat(MAX_NAME_LEN + 1);
        assert_matches!(require_text("title", &long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn require_text_accepts_padded_value() {
        assert!(require_text("title", "  Ada & Bo  ").is_ok());
    }
}
