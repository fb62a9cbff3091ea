//! Route definitions for organizer-owned events and everything under them.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{collateral, custom_question, event, flow, guest, media, section};
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /                                    -> list
/// POST   /                                    -> create
/// GET    /{id}                                -> get_by_id
/// PUT    /{id}                                -> update
/// DELETE /{id}                                -> delete
///
/// GET    /{id}/questions                      -> custom_question::list
/// POST   /{id}/questions                      -> custom_question::create
/// PUT    /{id}/questions/reorder              -> custom_question::reorder
/// PUT    /{id}/questions/{question_id}        -> custom_question::update
/// DELETE /{id}/questions/{question_id}        -> custom_question::delete
///
/// GET    /{id}/flow                           -> flow::preview
///
/// GET    /{id}/guests                         -> guest::list
/// POST   /{id}/guests                         -> guest::create
/// GET    /{id}/guests/summary                 -> guest::summary
/// GET    /{id}/guests/{guest_id}              -> guest::get_by_id
/// PUT    /{id}/guests/{guest_id}              -> guest::update
/// DELETE /{id}/guests/{guest_id}              -> guest::delete
///
/// GET    /{id}/sections                       -> section::list
/// PUT    /{id}/sections/{section}             -> section::upsert
/// DELETE /{id}/sections/{section}             -> section::reset
///
/// GET    /{id}/media                          -> media::list
/// POST   /{id}/media                          -> media::register
/// PUT    /{id}/media/{media_id}               -> media::update
/// DELETE /{id}/media/{media_id}               -> media::delete
///
/// GET    /{id}/collateral                     -> collateral::list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(event::list).post(event::create))
        .route(
            "/{id}",
            get(event::get_by_id)
                .put(event::update)
                .delete(event::delete),
        )
        // Questions
        .route(
            "/{id}/questions",
            get(custom_question::list).post(custom_question::create),
        )
        .route("/{id}/questions/reorder", put(custom_question::reorder))
        .route(
            "/{id}/questions/{question_id}",
            put(custom_question::update).delete(custom_question::delete),
        )
        // Flow
        .route("/{id}/flow", get(flow::preview))
        // Guests
        .route("/{id}/guests", get(guest::list).post(guest::create))
        .route("/{id}/guests/summary", get(guest::summary))
        .route(
            "/{id}/guests/{guest_id}",
            get(guest::get_by_id)
                .put(guest::update)
                .delete(guest::delete),
        )
        // Sections
        .route("/{id}/sections", get(section::list))
        .route(
            "/{id}/sections/{section}",
            put(section::upsert).delete(section::reset),
        )
        // Media
        .route("/{id}/media", get(media::list).post(media::register))
        .route(
            "/{id}/media/{media_id}",
            put(media::update).delete(media::delete),
        )
        // Collateral
        .route("/{id}/collateral", get(collateral::list))
}
