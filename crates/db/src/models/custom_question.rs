//! Custom RSVP question model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use vowly_core::custom_question::QuestionType;
use vowly_core::error::CoreError;
use vowly_core::invitation_flow::FlowQuestion;
use vowly_core::rsvp::AnswerableQuestion;
use vowly_core::types::{DbId, Timestamp};

/// A row from the `custom_questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomQuestion {
    pub id: DbId,
    pub event_id: DbId,
    pub question_type: String,
    pub title: String,
    pub description: Option<String>,
    pub options: Json<Vec<String>>,
    pub required: bool,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FlowQuestion for CustomQuestion {
    fn step_id(&self) -> String {
        self.id.to_string()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn order_index(&self) -> i32 {
        self.order_index
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl AnswerableQuestion for CustomQuestion {
    fn question_id(&self) -> String {
        self.id.to_string()
    }

    fn question_type(&self) -> Result<QuestionType, CoreError> {
        QuestionType::from_str_db(&self.question_type)
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn options(&self) -> &[String] {
        &self.options.0
    }

    fn required(&self) -> bool {
        self.required
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// DTO for creating a new question.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomQuestion {
    pub question_type: QuestionType,
    pub title: String,
    pub description: Option<String>,
    pub options: Option<Vec<String>>,
    pub required: Option<bool>,
    pub order_index: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a question. All fields optional; the type is immutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomQuestion {
    pub title: Option<String>,
    pub description: Option<String>,
    pub options: Option<Vec<String>>,
    pub required: Option<bool>,
    pub order_index: Option<i32>,
    pub is_active: Option<bool>,
}

/// Request body for reordering: question ids in their new order.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderQuestions {
    pub question_ids: Vec<DbId>,
}
