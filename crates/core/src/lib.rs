//! Domain logic for the Vowly wedding-event platform.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db` and
//! `api` crates build on these types and rules.

pub mod collateral;
pub mod custom_question;
pub mod error;
pub mod invitation_flow;
pub mod media;
pub mod plans;
pub mod rsvp;
pub mod sections;
pub mod types;
pub mod www_id;
