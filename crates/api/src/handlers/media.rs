//! Handlers for curating an event's gallery.
//!
//! Only metadata passes through this service; clients upload bytes to the
//! returned `storage_key` in object storage.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vowly_core::error::CoreError;
use vowly_core::media::{storage_key, validate_caption, validate_upload};
use vowly_core::plans::{ensure_feature, ensure_within_limit, Feature, Limit, Plan};
use vowly_core::types::DbId;
use vowly_db::models::event::Event;
use vowly_db::models::media::{MediaItem, RegisterMedia, UpdateMedia};
use vowly_db::repositories::MediaRepo;
use vowly_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::event::load_owned_event;
use crate::handlers::me::organizer_plan;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{id}/media?limit=&offset=
///
/// All media, hidden items included, newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let (limit, offset) = params.resolve();
    let items = MediaRepo::list_for_event(&state.pool, event.id, false, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/events/{id}/media
///
/// Register an organizer upload. Needs [`Feature::Gallery`].
pub async fn register(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<DbId>,
    Json(input): Json<RegisterMedia>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let plan = organizer_plan(&state, &user).await?;
    ensure_feature(plan, Feature::Gallery)?;

    let item = register_media(&state.pool, &event, plan, &input, false).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/events/{id}/media/{media_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((event_id, media_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateMedia>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    validate_caption(input.caption.as_deref())?;

    let item = MediaRepo::update(&state.pool, event.id, media_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaItem",
            id: media_id,
        }))?;

    tracing::info!(
        event_id = %event.id,
        media_id = %media_id,
        is_visible = item.is_visible,
        "Media updated"
    );
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/events/{id}/media/{media_id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((event_id, media_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let deleted = MediaRepo::delete(&state.pool, event.id, media_id).await?;
    if deleted {
        tracing::info!(event_id = %event.id, media_id = %media_id, "Media deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "MediaItem",
            id: media_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Validate an upload against the media rules and the plan's cap, then
/// record it under a fresh storage key.
pub(crate) async fn register_media(
    pool: &DbPool,
    event: &Event,
    plan: Plan,
    input: &RegisterMedia,
    uploaded_by_guest: bool,
) -> AppResult<MediaItem> {
    let ext = validate_upload(&input.content_type, input.byte_size, input.caption.as_deref())?;

    let count = MediaRepo::count_for_event(pool, event.id).await?;
    ensure_within_limit(plan, Limit::MediaItems, count)?;

    let media_id = uuid::Uuid::new_v4();
    let key = storage_key(event.id, media_id, ext);
    let item = MediaRepo::create(pool, media_id, event.id, &key, input, uploaded_by_guest).await?;

    tracing::info!(
        event_id = %event.id,
        media_id = %item.id,
        uploaded_by_guest,
        byte_size = item.byte_size,
        "Media registered"
    );
    Ok(item)
}
