//! Route definitions for the guest-facing microsite.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public/events`. No authentication.
///
/// ```text
/// GET  /{www_id}                   -> page
/// GET  /{www_id}/flow              -> flow
/// GET  /{www_id}/flow/{step_id}    -> step
/// POST /{www_id}/rsvp              -> submit_rsvp
/// GET  /{www_id}/media             -> media
/// POST /{www_id}/media             -> upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{www_id}", get(public::page))
        .route("/{www_id}/flow", get(public::flow))
        .route("/{www_id}/flow/{step_id}", get(public::step))
        .route("/{www_id}/rsvp", post(public::submit_rsvp))
        .route("/{www_id}/media", get(public::media).post(public::upload))
}
