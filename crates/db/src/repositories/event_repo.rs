//! Repository for the `events` table.
//!
//! Organizer-facing queries are always scoped by `organizer_id` so one
//! tenant can never read or modify another tenant's events.

use sqlx::PgPool;
use vowly_core::types::DbId;

use crate::models::event::{CreateEvent, Event, UpdateEvent};

const COLUMNS: &str = "id, organizer_id, www_id, title, partner_one, partner_two, starts_at, \
    venue_name, venue_address, timezone, is_published, created_at, updated_at";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event with a pre-generated public id.
    ///
    /// A `www_id` collision surfaces as a unique violation on
    /// `uq_events_www_id`; callers retry with a fresh id.
    pub async fn create(
        pool: &PgPool,
        organizer_id: DbId,
        www_id: &str,
        input: &CreateEvent,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events \
                (organizer_id, www_id, title, partner_one, partner_two, starts_at, \
                 venue_name, venue_address, timezone) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 'UTC')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(organizer_id)
            .bind(www_id)
            .bind(&input.title)
            .bind(&input.partner_one)
            .bind(&input.partner_two)
            .bind(input.starts_at)
            .bind(&input.venue_name)
            .bind(&input.venue_address)
            .bind(&input.timezone)
            .fetch_one(pool)
            .await
    }

    /// Find an event owned by `organizer_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        organizer_id: DbId,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1 AND organizer_id = $2");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(organizer_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a public identifier to its event, published or not.
    pub async fn find_by_www_id(pool: &PgPool, www_id: &str) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE www_id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(www_id)
            .fetch_optional(pool)
            .await
    }

    /// List an organizer's events, soonest first; undated events last.
    pub async fn list_for_organizer(
        pool: &PgPool,
        organizer_id: DbId,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events WHERE organizer_id = $1 \
             ORDER BY starts_at ASC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(organizer_id)
            .fetch_all(pool)
            .await
    }

    /// Update an owned event. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no such event belongs to `organizer_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        organizer_id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET \
                title = COALESCE($3, title), \
                partner_one = COALESCE($4, partner_one), \
                partner_two = COALESCE($5, partner_two), \
                starts_at = COALESCE($6, starts_at), \
                venue_name = COALESCE($7, venue_name), \
                venue_address = COALESCE($8, venue_address), \
                timezone = COALESCE($9, timezone), \
                is_published = COALESCE($10, is_published) \
             WHERE id = $1 AND organizer_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(organizer_id)
            .bind(&input.title)
            .bind(&input.partner_one)
            .bind(&input.partner_two)
            .bind(input.starts_at)
            .bind(&input.venue_name)
            .bind(&input.venue_address)
            .bind(&input.timezone)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned event and, by cascade, everything under it.
    pub async fn delete(pool: &PgPool, id: DbId, organizer_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND organizer_id = $2")
            .bind(id)
            .bind(organizer_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
