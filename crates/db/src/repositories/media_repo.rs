//! Repository for the `media_items` table.

use sqlx::PgPool;
use vowly_core::types::DbId;

use crate::models::media::{MediaItem, RegisterMedia, UpdateMedia};

const COLUMNS: &str = "id, event_id, storage_key, content_type, byte_size, caption, \
    uploaded_by_guest, is_visible, created_at";

/// Provides CRUD operations for gallery media metadata.
pub struct MediaRepo;

impl MediaRepo {
    /// Register an upload. The id is chosen by the caller because it is
    /// already embedded in `storage_key`.
    pub async fn create(
        pool: &PgPool,
        id: DbId,
        event_id: DbId,
        storage_key: &str,
        input: &RegisterMedia,
        uploaded_by_guest: bool,
    ) -> Result<MediaItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_items \
                (id, event_id, storage_key, content_type, byte_size, caption, uploaded_by_guest) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .bind(event_id)
            .bind(storage_key)
            .bind(input.content_type.trim().to_ascii_lowercase())
            .bind(input.byte_size)
            .bind(&input.caption)
            .bind(uploaded_by_guest)
            .fetch_one(pool)
            .await
    }

    /// List an event's media, newest first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
        visible_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaItem>, sqlx::Error> {
        let query = if visible_only {
            format!(
                "SELECT {COLUMNS} FROM media_items WHERE event_id = $1 AND is_visible = true \
                 ORDER BY created_at DESC, id LIMIT $2 OFFSET $3"
            )
        } else {
            format!(
                "SELECT {COLUMNS} FROM media_items WHERE event_id = $1 \
                 ORDER BY created_at DESC, id LIMIT $2 OFFSET $3"
            )
        };
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(event_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_event(pool: &PgPool, event_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM media_items WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    pub async fn update(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
        input: &UpdateMedia,
    ) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!(
            "UPDATE media_items SET \
                caption = COALESCE($3, caption), \
                is_visible = COALESCE($4, is_visible) \
             WHERE id = $1 AND event_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .bind(event_id)
            .bind(&input.caption)
            .bind(input.is_visible)
            .fetch_optional(pool)
            .await
    }

    /// Delete the metadata row. Removing the stored object is the blob
    /// store's lifecycle policy's job.
    pub async fn delete(pool: &PgPool, event_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_items WHERE id = $1 AND event_id = $2")
            .bind(id)
            .bind(event_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
