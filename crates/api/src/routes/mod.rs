//! The `/api/v1` route tree.
//!
//! Route hierarchy:
//!
//! ```text
//! /me                                              profile + plan (auth)
//!
//! /events                                          list, create (auth)
//! /events/{id}                                     get, update, delete
//! /events/{id}/questions                           list, create
//! /events/{id}/questions/reorder                   reorder (PUT)
//! /events/{id}/questions/{question_id}             update, delete
//! /events/{id}/flow                                flow preview
//! /events/{id}/guests                              list, add
//! /events/{id}/guests/summary                      RSVP counts
//! /events/{id}/guests/{guest_id}                   get, update, delete
//! /events/{id}/sections                            resolved sections
//! /events/{id}/sections/{section}                  upsert, reset
//! /events/{id}/media                               list, register
//! /events/{id}/media/{media_id}                    update, delete
//! /events/{id}/collateral                          QR/PDF descriptors
//!
//! /public/events/{www_id}                          composed microsite
//! /public/events/{www_id}/flow                     invitation steps
//! /public/events/{www_id}/flow/{step_id}           step navigation
//! /public/events/{www_id}/rsvp                     submit RSVP (POST)
//! /public/events/{www_id}/media                    gallery, guest upload
//! ```

pub mod event;
pub mod health;
pub mod me;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Authenticated organizer routes: `/me` and `/events`.
pub fn organizer_routes() -> Router<AppState> {
    Router::new()
        .nest("/me", me::router())
        .nest("/events", event::router())
}

/// Unauthenticated guest routes under `/public/events`.
pub fn public_routes() -> Router<AppState> {
    Router::new().nest("/public/events", public::router())
}
