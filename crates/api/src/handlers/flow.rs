//! Invitation flow resolution for HTTP callers.
//!
//! Both the organizer preview and the public guest endpoints resolve the
//! flow the same way: the event's active custom questions, ordered by
//! `order_index`, merged into the default steps under the event's code.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use vowly_core::invitation_flow::InvitationFlow;
use vowly_core::plans::{Feature, Plan};
use vowly_core::types::DbId;
use vowly_db::models::custom_question::CustomQuestion;
use vowly_db::models::event::Event;
use vowly_db::repositories::CustomQuestionRepo;
use vowly_db::DbPool;

use crate::error::AppResult;
use crate::handlers::event::load_owned_event;
use crate::handlers::me::organizer_plan;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/events/{id}/flow
///
/// The flow guests will see once the event is published.
pub async fn preview(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let plan = organizer_plan(&state, &user).await?;
    let flow = resolve_flow(&state.pool, &event, plan).await?;
    Ok(Json(DataResponse { data: flow }))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Questions that take part in the event's flow and RSVP validation.
///
/// Empty when the plan no longer covers custom questions, so a downgraded
/// event falls back to the default steps.
pub(crate) async fn flow_questions(
    pool: &DbPool,
    event: &Event,
    plan: Plan,
) -> AppResult<Vec<CustomQuestion>> {
    if !plan.allows(Feature::CustomQuestions) {
        return Ok(Vec::new());
    }
    Ok(CustomQuestionRepo::list_for_event(pool, event.id, false).await?)
}

pub(crate) async fn resolve_flow(
    pool: &DbPool,
    event: &Event,
    plan: Plan,
) -> AppResult<InvitationFlow> {
    let questions = flow_questions(pool, event, plan).await?;
    Ok(InvitationFlow::build(&questions, &event.www_id))
}
