//! Guest-facing handlers, addressed by event code and unauthenticated.
//!
//! Only published events are visible. An unpublished or unknown code is a
//! plain 404 so codes cannot be guessed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use vowly_core::collateral::upload_path;
use vowly_core::error::CoreError;
use vowly_core::invitation_flow::{invitation_base_path, InvitationFlow, StepNavigation};
use vowly_core::plans::{ensure_feature, ensure_within_limit, Feature, Limit, Plan};
use vowly_core::rsvp::{RsvpStatus, RsvpSubmission};
use vowly_core::sections::{compose_page, ResolvedSection};
use vowly_core::types::DbId;
use vowly_core::www_id;
use vowly_db::models::event::{Event, PublicEvent};
use vowly_db::models::media::RegisterMedia;
use vowly_db::repositories::{EventRepo, GuestRepo, MediaRepo, OrganizerRepo};
use vowly_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::flow::{flow_questions, resolve_flow};
use crate::handlers::media::register_media;
use crate::handlers::section::section_overrides;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// The composed microsite for one event.
#[derive(Debug, Serialize)]
pub struct PublicPage {
    pub event: PublicEvent,
    /// Visible, plan-covered sections in page order.
    pub sections: Vec<ResolvedSection>,
    /// Entry point of the invitation flow.
    pub invitation_path: String,
    /// Present when guests may upload photos.
    pub upload_path: Option<String>,
}

/// Acknowledgement returned to the guest after an RSVP.
#[derive(Debug, Serialize)]
pub struct RsvpReceipt {
    pub guest_id: DbId,
    pub rsvp_status: RsvpStatus,
    pub party_size: i32,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/public/events/{www_id}
pub async fn page(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let (event, plan) = load_published_event(&state.pool, &code).await?;
    let overrides = section_overrides(&state.pool, event.id).await?;
    let sections = compose_page(&overrides, plan);

    Ok(Json(DataResponse {
        data: PublicPage {
            invitation_path: invitation_base_path(&event.www_id),
            upload_path: plan
                .allows(Feature::GuestUploads)
                .then(|| upload_path(&event.www_id)),
            sections,
            event: PublicEvent::from(&event),
        },
    }))
}

/// GET /api/v1/public/events/{www_id}/flow
pub async fn flow(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let (event, plan) = load_published_event(&state.pool, &code).await?;
    let flow = resolve_flow(&state.pool, &event, plan).await?;
    Ok(Json(DataResponse { data: flow }))
}

/// GET /api/v1/public/events/{www_id}/flow/{step_id}
///
/// Index, total, next, and previous for one step. Default steps are
/// addressed by their kebab-case id, custom steps by question id (or
/// `custom:{question_id}`). A step outside the flow is a 404.
pub async fn step(
    State(state): State<AppState>,
    Path((code, step_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let (event, plan) = load_published_event(&state.pool, &code).await?;
    let flow = resolve_flow(&state.pool, &event, plan).await?;
    let navigation = locate_step(&flow, &step_id)?;
    Ok(Json(DataResponse { data: navigation }))
}

/// POST /api/v1/public/events/{www_id}/rsvp
///
/// Record a guest's response. A guest already on the list with the same
/// email is updated; anyone else is added, subject to the plan's guest cap.
pub async fn submit_rsvp(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(submission): Json<RsvpSubmission>,
) -> AppResult<impl IntoResponse> {
    let (event, plan) = load_published_event(&state.pool, &code).await?;
    let submission = submission.normalize();

    let questions = flow_questions(&state.pool, &event, plan).await?;
    submission.validate(&questions)?;

    let known_guest = match submission.email.as_deref() {
        Some(email) => GuestRepo::find_by_email(&state.pool, event.id, email)
            .await?
            .is_some(),
        None => false,
    };
    if !known_guest {
        let count = GuestRepo::count_for_event(&state.pool, event.id).await?;
        ensure_within_limit(plan, Limit::Guests, count)?;
    }

    let answers = submission
        .answers
        .iter()
        .map(|(question_id, answer)| {
            let id = question_id.parse::<DbId>().map_err(|_| {
                AppError::BadRequest(format!("Invalid question id '{question_id}'"))
            })?;
            Ok((id, answer.clone()))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let guest = GuestRepo::record_rsvp(&state.pool, event.id, &submission, &answers).await?;
    tracing::info!(
        event_id = %event.id,
        guest_id = %guest.id,
        status = guest.rsvp_status.as_str(),
        returning = known_guest,
        "RSVP received"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RsvpReceipt {
                guest_id: guest.id,
                rsvp_status: guest.status()?,
                party_size: guest.party_size,
            },
        }),
    ))
}

/// GET /api/v1/public/events/{www_id}/media?limit=&offset=
///
/// Visible gallery items. Needs [`Feature::Gallery`].
pub async fn media(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (event, plan) = load_published_event(&state.pool, &code).await?;
    ensure_feature(plan, Feature::Gallery)?;

    let (limit, offset) = params.resolve();
    let items = MediaRepo::list_for_event(&state.pool, event.id, true, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/public/events/{www_id}/media
///
/// Register a guest upload. Needs [`Feature::GuestUploads`].
pub async fn upload(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(input): Json<RegisterMedia>,
) -> AppResult<impl IntoResponse> {
    let (event, plan) = load_published_event(&state.pool, &code).await?;
    ensure_feature(plan, Feature::GuestUploads)?;

    let item = register_media(&state.pool, &event, plan, &input, true).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Resolve a guest-typed event code to a published event and its owner's plan.
///
/// Malformed codes are rejected before touching the database.
async fn load_published_event(pool: &DbPool, code: &str) -> AppResult<(Event, Plan)> {
    let code = www_id::parse(code)?;
    let event = EventRepo::find_by_www_id(pool, &code)
        .await?
        .filter(|event| event.is_published)
        .ok_or_else(|| AppError::NotFound(format!("Event '{code}' not found")))?;

    let organizer = OrganizerRepo::find_by_id(pool, event.organizer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organizer",
            id: event.organizer_id,
        }))?;
    Ok((event, organizer.plan()?))
}

/// Navigation for `step_id`, or a 404 when the step is not in `flow`.
fn locate_step(flow: &InvitationFlow, step_id: &str) -> AppResult<StepNavigation> {
    flow.navigation(step_id).ok_or_else(|| {
        AppError::NotFound(format!("Step '{step_id}' is not part of this invitation"))
    })
}
