//! Handlers for an event's custom RSVP questions.
//!
//! Creating questions is plan-gated by [`Feature::CustomQuestions`] and
//! capped per event by [`Limit::CustomQuestions`]. Editing and deleting
//! existing questions stays available after a downgrade.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vowly_core::custom_question::{reorder_indices, validate_question, QuestionType};
use vowly_core::error::CoreError;
use vowly_core::plans::{ensure_feature, ensure_within_limit, Feature, Limit};
use vowly_core::types::DbId;
use vowly_db::models::custom_question::{
    CreateCustomQuestion, ReorderQuestions, UpdateCustomQuestion,
};
use vowly_db::repositories::CustomQuestionRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::event::load_owned_event;
use crate::handlers::me::organizer_plan;
use crate::middleware::auth::AuthUser;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{id}/questions?include_inactive=false
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<DbId>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let questions =
        CustomQuestionRepo::list_for_event(&state.pool, event.id, params.include_inactive).await?;
    Ok(Json(DataResponse { data: questions }))
}

/// POST /api/v1/events/{id}/questions
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateCustomQuestion>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let plan = organizer_plan(&state, &user).await?;
    ensure_feature(plan, Feature::CustomQuestions)?;

    let count = CustomQuestionRepo::count_for_event(&state.pool, event.id).await?;
    ensure_within_limit(plan, Limit::CustomQuestions, count)?;

    validate_question(
        input.question_type,
        &input.title,
        input.options.as_deref().unwrap_or_default(),
        input.order_index.unwrap_or(0),
    )?;

    let question = CustomQuestionRepo::create(&state.pool, event.id, &input).await?;

    tracing::info!(
        event_id = %event.id,
        question_id = %question.id,
        question_type = input.question_type.as_str(),
        "Custom question created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// PUT /api/v1/events/{id}/questions/{question_id}
///
/// Patch a question. The merged result is validated as a whole, so e.g.
/// options cannot be cleared from a multiple-choice question.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((event_id, question_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCustomQuestion>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let existing = CustomQuestionRepo::find(&state.pool, event.id, question_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CustomQuestion",
            id: question_id,
        }))?;

    let question_type = QuestionType::from_str_db(&existing.question_type)?;
    validate_question(
        question_type,
        input.title.as_deref().unwrap_or(existing.title.as_str()),
        input.options.as_deref().unwrap_or(existing.options.0.as_slice()),
        input.order_index.unwrap_or(existing.order_index),
    )?;

    let question = CustomQuestionRepo::update(&state.pool, event.id, question_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CustomQuestion",
            id: question_id,
        }))?;

    tracing::info!(event_id = %event.id, question_id = %question_id, "Custom question updated");
    Ok(Json(DataResponse { data: question }))
}

/// DELETE /api/v1/events/{id}/questions/{question_id}
///
/// Stored answers to the question are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((event_id, question_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let event = load_owned_event(&state, &user, event_id).await?;
    let deleted = CustomQuestionRepo::delete(&state.pool, event.id, question_id).await?;
    if deleted {
        tracing::info!(event_id = %event.id, question_id = %question_id, "Custom question deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "CustomQuestion",
            id: question_id,
        }))
    }
}

/// PUT /api/v1/events/{id}/questions/reorder
///
/// Body: `{ "question_ids": [...] }`. The listed questions receive
/// `order_index` 0, 1, 2, ... in the given order. Questions not listed keep
/// their current index.
pub async fn reorder(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<DbId>,
    Json(input): Json<ReorderQuestions>,
) -> AppResult<impl IntoResponse> {
    let event = load_owned_event(&state, &user, event_id).await?;
    if input.question_ids.is_empty() {
        return Err(AppError::BadRequest("question_ids must not be empty".into()));
    }

    let order = reorder_indices(&input.question_ids)?;
    let applied = CustomQuestionRepo::reorder(&state.pool, event.id, &order).await?;
    if !applied {
        return Err(AppError::BadRequest(
            "question_ids contains a question that does not belong to this event".into(),
        ));
    }

    tracing::info!(event_id = %event.id, count = order.len(), "Custom questions reordered");
    let questions = CustomQuestionRepo::list_for_event(&state.pool, event.id, true).await?;
    Ok(Json(DataResponse { data: questions }))
}
