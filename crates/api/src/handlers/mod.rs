//! Request handlers.
//!
//! Organizer handlers are scoped to the authenticated organizer's events;
//! [`public`] serves guests by event code without authentication. Handlers
//! delegate to the repositories in `vowly_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod collateral;
pub mod custom_question;
pub mod event;
pub mod flow;
pub mod guest;
pub mod me;
pub mod media;
pub mod public;
pub mod section;
