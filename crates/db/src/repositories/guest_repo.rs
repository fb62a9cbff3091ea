//! Repository for the `guests` and `rsvp_answers` tables.

use sqlx::PgPool;
use vowly_core::rsvp::RsvpSubmission;
use vowly_core::types::DbId;

use crate::models::guest::{CreateGuest, Guest, RsvpAnswer, UpdateGuest};

const COLUMNS: &str = "id, event_id, full_name, email, phone, party_size, rsvp_status, \
    attending_after_party, food_preference, dietary_notes, needs_accommodation, \
    needs_transportation, note, responded_at, created_at, updated_at";

const ANSWER_COLUMNS: &str = "guest_id, question_id, answer, created_at";

/// Provides CRUD and RSVP operations for guests.
pub struct GuestRepo;

impl GuestRepo {
    /// Add a guest to the list with a pending RSVP.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateGuest,
    ) -> Result<Guest, sqlx::Error> {
        let query = format!(
            "INSERT INTO guests (event_id, full_name, email, phone, party_size) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 1)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(event_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.party_size)
            .fetch_one(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
    ) -> Result<Option<Guest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM guests WHERE id = $1 AND event_id = $2");
        sqlx::query_as::<_, Guest>(&query)
            .bind(id)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive email lookup, as used to match an RSVP to the list.
    pub async fn find_by_email(
        pool: &PgPool,
        event_id: DbId,
        email: &str,
    ) -> Result<Option<Guest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM guests WHERE event_id = $1 AND lower(email) = lower($2)"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(event_id)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List an event's guests alphabetically, paginated.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Guest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM guests WHERE event_id = $1 \
             ORDER BY lower(full_name), id LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(event_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_event(pool: &PgPool, event_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM guests WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// `(rsvp_status, party_size)` for every guest, for headcount summaries.
    pub async fn statuses_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<(String, i32)>, sqlx::Error> {
        sqlx::query_as("SELECT rsvp_status, party_size FROM guests WHERE event_id = $1")
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Update a guest. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
        input: &UpdateGuest,
    ) -> Result<Option<Guest>, sqlx::Error> {
        let query = format!(
            "UPDATE guests SET \
                full_name = COALESCE($3, full_name), \
                email = COALESCE($4, email), \
                phone = COALESCE($5, phone), \
                party_size = COALESCE($6, party_size), \
                rsvp_status = COALESCE($7, rsvp_status), \
                food_preference = COALESCE($8, food_preference), \
                dietary_notes = COALESCE($9, dietary_notes) \
             WHERE id = $1 AND event_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(id)
            .bind(event_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.party_size)
            .bind(input.rsvp_status.map(|s| s.as_str()))
            .bind(&input.food_preference)
            .bind(&input.dietary_notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, event_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1 AND event_id = $2")
            .bind(id)
            .bind(event_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn answers_for_guest(
        pool: &PgPool,
        guest_id: DbId,
    ) -> Result<Vec<RsvpAnswer>, sqlx::Error> {
        let query = format!(
            "SELECT {ANSWER_COLUMNS} FROM rsvp_answers WHERE guest_id = $1 ORDER BY created_at"
        );
        sqlx::query_as::<_, RsvpAnswer>(&query)
            .bind(guest_id)
            .fetch_all(pool)
            .await
    }

    /// Record a validated RSVP in one transaction.
    ///
    /// A guest already on the list with the same email (case-insensitive)
    /// is updated in place; otherwise a new guest row is created. Previous
    /// answers are replaced by the submitted set. `answers` must already be
    /// keyed by parsed question id.
    pub async fn record_rsvp(
        pool: &PgPool,
        event_id: DbId,
        submission: &RsvpSubmission,
        answers: &[(DbId, String)],
    ) -> Result<Guest, sqlx::Error> {
        let status = submission.status();
        let mut tx = pool.begin().await?;

        let existing: Option<(DbId,)> = match submission.email.as_deref() {
            Some(email) => {
                sqlx::query_as(
                    "SELECT id FROM guests WHERE event_id = $1 AND lower(email) = lower($2) \
                     FOR UPDATE",
                )
                .bind(event_id)
                .bind(email)
                .fetch_optional(&mut *tx)
                .await?
            }
            None => None,
        };

        let guest = match existing {
            Some((guest_id,)) => {
                let query = format!(
                    "UPDATE guests SET \
                        full_name = $2, phone = COALESCE($3, phone), party_size = $4, \
                        rsvp_status = $5, attending_after_party = $6, food_preference = $7, \
                        dietary_notes = $8, needs_accommodation = $9, needs_transportation = $10, \
                        note = $11, responded_at = NOW() \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Guest>(&query)
                    .bind(guest_id)
                    .bind(&submission.full_name)
                    .bind(&submission.phone)
                    .bind(submission.party_size)
                    .bind(status.as_str())
                    .bind(submission.attending_after_party)
                    .bind(&submission.food_preference)
                    .bind(&submission.dietary_notes)
                    .bind(submission.needs_accommodation)
                    .bind(submission.needs_transportation)
                    .bind(&submission.note)
                    .fetch_one(&mut *tx)
                    .await?
            }
            None => {
                let query = format!(
                    "INSERT INTO guests \
                        (event_id, full_name, email, phone, party_size, rsvp_status, \
                         attending_after_party, food_preference, dietary_notes, \
                         needs_accommodation, needs_transportation, note, responded_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW()) \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Guest>(&query)
                    .bind(event_id)
                    .bind(&submission.full_name)
                    .bind(&submission.email)
                    .bind(&submission.phone)
                    .bind(submission.party_size)
                    .bind(status.as_str())
                    .bind(submission.attending_after_party)
                    .bind(&submission.food_preference)
                    .bind(&submission.dietary_notes)
                    .bind(submission.needs_accommodation)
                    .bind(submission.needs_transportation)
                    .bind(&submission.note)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        sqlx::query("DELETE FROM rsvp_answers WHERE guest_id = $1")
            .bind(guest.id)
            .execute(&mut *tx)
            .await?;
        for (question_id, answer) in answers {
            sqlx::query(
                "INSERT INTO rsvp_answers (guest_id, question_id, answer) VALUES ($1, $2, $3)",
            )
            .bind(guest.id)
            .bind(question_id)
            .bind(answer)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(
            guest_id = %guest.id,
            event_id = %event_id,
            status = status.as_str(),
            answers = answers.len(),
            "RSVP recorded"
        );
        Ok(guest)
    }
}
