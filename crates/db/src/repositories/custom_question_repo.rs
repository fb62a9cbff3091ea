//! Repository for the `custom_questions` table.

use sqlx::types::Json;
use sqlx::PgPool;
use vowly_core::types::DbId;

use crate::models::custom_question::{CreateCustomQuestion, CustomQuestion, UpdateCustomQuestion};

const COLUMNS: &str = "id, event_id, question_type, title, description, options, required, \
    order_index, is_active, created_at, updated_at";

/// Provides CRUD operations for custom questions.
pub struct CustomQuestionRepo;

impl CustomQuestionRepo {
    /// Insert a new question.
    ///
    /// Without an explicit `order_index` the question is appended after the
    /// event's current last question.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateCustomQuestion,
    ) -> Result<CustomQuestion, sqlx::Error> {
        let query = format!(
            "INSERT INTO custom_questions \
                (event_id, question_type, title, description, options, required, \
                 order_index, is_active) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, false), \
                COALESCE($7, (SELECT COALESCE(MAX(order_index) + 1, 0) \
                              FROM custom_questions WHERE event_id = $1)), \
                COALESCE($8, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomQuestion>(&query)
            .bind(event_id)
            .bind(input.question_type.as_str())
            .bind(&input.title)
            .bind(&input.description)
            .bind(Json(input.options.clone().unwrap_or_default()))
            .bind(input.required)
            .bind(input.order_index)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a question belonging to `event_id`.
    pub async fn find(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
    ) -> Result<Option<CustomQuestion>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM custom_questions WHERE id = $1 AND event_id = $2");
        sqlx::query_as::<_, CustomQuestion>(&query)
            .bind(id)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// List an event's questions, optionally including inactive ones.
    ///
    /// Ordered by `order_index`, then creation time, so ties are stable.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
        include_inactive: bool,
    ) -> Result<Vec<CustomQuestion>, sqlx::Error> {
        let query = if include_inactive {
            format!(
                "SELECT {COLUMNS} FROM custom_questions WHERE event_id = $1 \
                 ORDER BY order_index, created_at, id"
            )
        } else {
            format!(
                "SELECT {COLUMNS} FROM custom_questions WHERE event_id = $1 AND is_active = true \
                 ORDER BY order_index, created_at, id"
            )
        };
        sqlx::query_as::<_, CustomQuestion>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Count an event's questions (active and inactive) for plan limits.
    pub async fn count_for_event(pool: &PgPool, event_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM custom_questions WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Update a question. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
        input: &UpdateCustomQuestion,
    ) -> Result<Option<CustomQuestion>, sqlx::Error> {
        let query = format!(
            "UPDATE custom_questions SET \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                options = COALESCE($5, options), \
                required = COALESCE($6, required), \
                order_index = COALESCE($7, order_index), \
                is_active = COALESCE($8, is_active) \
             WHERE id = $1 AND event_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomQuestion>(&query)
            .bind(id)
            .bind(event_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.options.clone().map(Json))
            .bind(input.required)
            .bind(input.order_index)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, event_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM custom_questions WHERE id = $1 AND event_id = $2")
            .bind(id)
            .bind(event_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply new `order_index` values in one transaction.
    ///
    /// Returns `false` (and rolls back) if any id does not belong to the event.
    pub async fn reorder(
        pool: &PgPool,
        event_id: DbId,
        order: &[(DbId, i32)],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        for (id, order_index) in order {
            let result = sqlx::query(
                "UPDATE custom_questions SET order_index = $3 WHERE id = $1 AND event_id = $2",
            )
            .bind(id)
            .bind(event_id)
            .bind(order_index)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                tx.rollback().await?;
                return Ok(false);
            }
        }
        tx.commit().await?;
        Ok(true)
    }
}
