//! Repository for the `event_sections` table.

use sqlx::types::Json;
use sqlx::PgPool;
use vowly_core::types::DbId;

use crate::models::section::{EventSection, UpsertSection};

const COLUMNS: &str = "event_id, section, is_visible, content, sort_order, updated_at";

/// Provides read and upsert operations for section overrides.
pub struct SectionRepo;

impl SectionRepo {
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<EventSection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_sections WHERE event_id = $1");
        sqlx::query_as::<_, EventSection>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or patch the override for one section.
    ///
    /// Uses `ON CONFLICT (event_id, section) DO UPDATE` so each section has at
    /// most one row; omitted fields keep their stored value.
    pub async fn upsert(
        pool: &PgPool,
        event_id: DbId,
        section: &str,
        input: &UpsertSection,
    ) -> Result<EventSection, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_sections (event_id, section, is_visible, content, sort_order) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (event_id, section) DO UPDATE SET \
                is_visible = COALESCE(EXCLUDED.is_visible, event_sections.is_visible), \
                content = COALESCE(EXCLUDED.content, event_sections.content), \
                sort_order = COALESCE(EXCLUDED.sort_order, event_sections.sort_order) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventSection>(&query)
            .bind(event_id)
            .bind(section)
            .bind(input.is_visible)
            .bind(input.content.clone().map(Json))
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Drop an override so the section reverts to its defaults.
    pub async fn reset(pool: &PgPool, event_id: DbId, section: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM event_sections WHERE event_id = $1 AND section = $2")
            .bind(event_id)
            .bind(section)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
