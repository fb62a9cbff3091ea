//! Repository for the `organizers` table.

use sqlx::PgPool;
use vowly_core::types::DbId;

use crate::models::organizer::{Organizer, UpdateOrganizer};

const COLUMNS: &str = "id, email, display_name, plan, created_at, updated_at";

/// Provides lookup and upsert operations for organizers.
pub struct OrganizerRepo;

impl OrganizerRepo {
    /// Return the organizer row for `id`, creating it on first sight.
    ///
    /// The identity already exists at the auth provider; this only makes sure
    /// we have a local row (on the free plan) to attach events to.
    pub async fn ensure(pool: &PgPool, id: DbId) -> Result<Organizer, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizers (id) VALUES ($1) \
             ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organizer>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Organizer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizers WHERE id = $1");
        sqlx::query_as::<_, Organizer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrganizer,
    ) -> Result<Option<Organizer>, sqlx::Error> {
        let query = format!(
            "UPDATE organizers SET \
                email = COALESCE($2, email), \
                display_name = COALESCE($3, display_name) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organizer>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.display_name)
            .fetch_optional(pool)
            .await
    }

    /// Set the subscription plan (called by the billing integration).
    pub async fn set_plan(pool: &PgPool, id: DbId, plan: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE organizers SET plan = $2 WHERE id = $1")
            .bind(id)
            .bind(plan)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
