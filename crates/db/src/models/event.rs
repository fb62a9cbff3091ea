//! Event entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vowly_core::types::{DbId, Timestamp};

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub organizer_id: DbId,
    /// Short public code used in guest-facing URLs.
    pub www_id: String,
    pub title: String,
    pub partner_one: String,
    pub partner_two: String,
    pub starts_at: Option<Timestamp>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub timezone: String,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new event. `www_id` is generated server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub partner_one: String,
    pub partner_two: String,
    pub starts_at: Option<Timestamp>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub timezone: Option<String>,
}

/// DTO for updating an existing event. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub partner_one: Option<String>,
    pub partner_two: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub timezone: Option<String>,
    pub is_published: Option<bool>,
}

/// Guest-facing projection of an event; omits ownership and bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct PublicEvent {
    pub www_id: String,
    pub title: String,
    pub partner_one: String,
    pub partner_two: String,
    pub starts_at: Option<Timestamp>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub timezone: String,
}

impl From<&Event> for PublicEvent {
    fn from(event: &Event) -> Self {
        Self {
            www_id: event.www_id.clone(),
            title: event.title.clone(),
            partner_one: event.partner_one.clone(),
            partner_two: event.partner_two.clone(),
            starts_at: event.starts_at,
            venue_name: event.venue_name.clone(),
            venue_address: event.venue_address.clone(),
            timezone: event.timezone.clone(),
        }
    }
}
