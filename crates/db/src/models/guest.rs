//! Guest and RSVP answer models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vowly_core::error::CoreError;
use vowly_core::rsvp::RsvpStatus;
use vowly_core::types::{DbId, Timestamp};

/// A row from the `guests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Guest {
    pub id: DbId,
    pub event_id: DbId,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub party_size: i32,
    pub rsvp_status: String,
    pub attending_after_party: Option<bool>,
    pub food_preference: Option<String>,
    pub dietary_notes: Option<String>,
    pub needs_accommodation: Option<bool>,
    pub needs_transportation: Option<bool>,
    pub note: Option<String>,
    pub responded_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Guest {
    pub fn status(&self) -> Result<RsvpStatus, CoreError> {
        RsvpStatus::from_str_db(&self.rsvp_status)
    }
}

/// A row from the `rsvp_answers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RsvpAnswer {
    pub guest_id: DbId,
    pub question_id: DbId,
    pub answer: String,
    pub created_at: Timestamp,
}

/// DTO for an organizer adding a guest to the list ahead of any RSVP.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGuest {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub party_size: Option<i32>,
}

/// DTO for an organizer editing a guest. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGuest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub party_size: Option<i32>,
    pub rsvp_status: Option<RsvpStatus>,
    pub food_preference: Option<String>,
    pub dietary_notes: Option<String>,
}

/// A guest together with their custom question answers.
#[derive(Debug, Clone, Serialize)]
pub struct GuestWithAnswers {
    #[serde(flatten)]
    pub guest: Guest,
    pub answers: Vec<RsvpAnswer>,
}
