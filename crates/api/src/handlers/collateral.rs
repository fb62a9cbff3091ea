//! Handler for printable collateral descriptors.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use vowly_core::collateral::available_collateral;
use vowly_core::types::DbId;

use crate::error::AppResult;
use crate::handlers::event::load_owned_event;
use crate::handlers::me::organizer_plan;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/events/{id}/collateral
///
/// What the external renderer should produce for this event: one entry per
/// document the organizer's plan covers, each with its QR payload.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let plan = organizer_plan(&state, &user).await?;
    let collateral = available_collateral(
        plan,
        &state.config.public_base_url,
        &event.www_id,
        &event.title,
    );
    Ok(Json(DataResponse { data: collateral }))
}
