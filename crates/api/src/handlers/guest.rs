//! Handlers for an event's guest list.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vowly_core::error::CoreError;
use vowly_core::plans::{ensure_within_limit, Limit};
use vowly_core::rsvp::{RsvpStatus, RsvpSummary, MAX_PARTY_SIZE};
use vowly_core::types::DbId;
use vowly_db::models::guest::{CreateGuest, GuestWithAnswers, UpdateGuest};
use vowly_db::repositories::GuestRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::event::{load_owned_event, require_text};
use crate::handlers::me::organizer_plan;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{id}/guests?limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let (limit, offset) = params.resolve();
    let guests = GuestRepo::list_for_event(&state.pool, event.id, limit, offset).await?;
    Ok(Json(DataResponse { data: guests }))
}

/// POST /api/v1/events/{id}/guests
///
/// Add a guest ahead of their RSVP. Counts toward the plan's guest cap.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateGuest>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    require_text("full_name", &input.full_name)?;
    if let Some(party_size) = input.party_size {
        validate_party_size(party_size)?;
    }

    if let Some(email) = input.email.as_deref() {
        if GuestRepo::find_by_email(&state.pool, event.id, email)
            .await?
            .is_some()
        {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "A guest with email '{email}' is already on the list"
            ))));
        }
    }

    let plan = organizer_plan(&state, &user).await?;
    let count = GuestRepo::count_for_event(&state.pool, event.id).await?;
    ensure_within_limit(plan, Limit::Guests, count)?;

    let guest = GuestRepo::create(&state.pool, event.id, &input).await?;
    tracing::info!(event_id = %event.id, guest_id = %guest.id, "Guest added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: guest })))
}

/// GET /api/v1/events/{id}/guests/{guest_id}
///
/// A guest with their custom question answers.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path((event_id, guest_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let guest = GuestRepo::find(&state.pool, event.id, guest_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Guest",
            id: guest_id,
        }))?;
    let answers = GuestRepo::answers_for_guest(&state.pool, guest.id).await?;
    Ok(Json(DataResponse {
        data: GuestWithAnswers { guest, answers },
    }))
}

/// PUT /api/v1/events/{id}/guests/{guest_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((event_id, guest_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateGuest>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    if let Some(name) = &input.full_name {
        require_text("full_name", name)?;
    }
    if let Some(party_size) = input.party_size {
        validate_party_size(party_size)?;
    }

    let guest = GuestRepo::update(&state.pool, event.id, guest_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Guest",
            id: guest_id,
        }))?;

    tracing::info!(event_id = %event.id, guest_id = %guest_id, "Guest updated");
    Ok(Json(DataResponse { data: guest }))
}

/// DELETE /api/v1/events/{id}/guests/{guest_id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((event_id, guest_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let deleted = GuestRepo::delete(&state.pool, event.id, guest_id).await?;
    if deleted {
        tracing::info!(event_id = %event.id, guest_id = %guest_id, "Guest removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Guest",
            id: guest_id,
        }))
    }
}

/// GET /api/v1/events/{id}/guests/summary
///
/// RSVP counts and expected headcount.
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let rows = GuestRepo::statuses_for_event(&state.pool, event.id).await?;

    let mut summary = RsvpSummary::default();
    for (status, party_size) in rows {
        summary.add(RsvpStatus::from_str_db(&status)?, party_size);
    }
    Ok(Json(DataResponse { data: summary }))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn validate_party_size(party_size: i32) -> Result<(), CoreError> {
    if !(0..=MAX_PARTY_SIZE).contains(&party_size) {
        return Err(CoreError::Validation(format!(
            "party_size must be between 0 and {MAX_PARTY_SIZE}"
        )));
    }
    Ok(())
}
