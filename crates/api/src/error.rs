use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use vowly_core::error::CoreError;

/// PostgreSQL `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `check_violation`.
const PG_CHECK_VIOLATION: &str = "23514";

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error type returned by every handler.
///
/// Domain errors arrive as [`CoreError`]; database errors are classified by
/// SQLSTATE and constraint name. Every variant renders as
/// `{ "error": message, "code": CODE }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A resource addressed by something other than its id (a public event
    /// code, a flow step id) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Logged in full; the client only sees a generic message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    fn status_parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.status_parts();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

fn core_parts(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::PlanLimit(msg) => (StatusCode::PAYMENT_REQUIRED, "PLAN_LIMIT", msg.clone()),
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Guest-facing wording for the unique constraints a request can trip.
fn unique_constraint_message(constraint: &str) -> Option<&'static str> {
    match constraint {
        "uq_guests_event_email" => Some("A guest with this email is already on the list"),
        "uq_events_www_id" => Some("That event code is already taken"),
        "uq_media_items_storage_key" => Some("This media item is already registered"),
        _ => None,
    }
}

/// Map a sqlx error to a status, code, and client-safe message.
///
/// `RowNotFound` is 404. Unique violations on `uq_*` constraints are 409 and
/// check violations on `ck_*` constraints are 400. Anything else is a
/// logged 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    let db_err = match err {
        sqlx::Error::RowNotFound => {
            return (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
            )
        }
        sqlx::Error::Database(db_err) => db_err,
        other => {
            tracing::error!(error = %other, "Database error");
            return internal();
        }
    };

    let constraint = db_err.constraint().unwrap_or_default();
    match db_err.code().as_deref() {
        Some(PG_UNIQUE_VIOLATION) if constraint.starts_with("uq_") => {
            let message = unique_constraint_message(constraint).map_or_else(
                || format!("Duplicate value violates unique constraint: {constraint}"),
                str::to_string,
            );
            (StatusCode::CONFLICT, "CONFLICT", message)
        }
        Some(PG_CHECK_VIOLATION) if constraint.starts_with("ck_") => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Value violates check constraint: {constraint}"),
        ),
        _ => {
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
    }
}

/// Whether `err` is a unique violation on the named constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    err.as_database_error().is_some_and(|db_err| {
        db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION)
            && db_err.constraint() == Some(constraint)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_constraints_have_friendly_messages() {
        assert_eq!(
            unique_constraint_message("uq_guests_event_email"),
            Some("A guest with this email is already on the list")
        );
        assert_eq!(unique_constraint_message("uq_something_else"), None);
    }
}
