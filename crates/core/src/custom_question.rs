//! Custom RSVP question types and validation.
//!
//! Organizers add their own prompts to the invitation flow. This module owns
//! the rules for what a well-formed question looks like and what a guest may
//! answer to it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a question title.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a free-text answer.
pub const MAX_TEXT_ANSWER_LEN: usize = 1000;

/// Minimum number of choices for a multiple-choice question.
pub const MIN_CHOICES: usize = 2;

pub const ANSWER_YES: &str = "yes";
pub const ANSWER_NO: &str = "no";

// ---------------------------------------------------------------------------
// Question type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    YesNo,
    MultipleChoice,
    Text,
    Attendance,
    FoodPreference,
}

impl QuestionType {
    /// Parse a type string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "yes_no" => Ok(Self::YesNo),
            "multiple_choice" => Ok(Self::MultipleChoice),
            "text" => Ok(Self::Text),
            "attendance" => Ok(Self::Attendance),
            "food_preference" => Ok(Self::FoodPreference),
            _ => Err(CoreError::Validation(format!(
                "Invalid question type '{s}'. Must be one of: yes_no, multiple_choice, text, \
                 attendance, food_preference"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::YesNo => "yes_no",
            Self::MultipleChoice => "multiple_choice",
            Self::Text => "text",
            Self::Attendance => "attendance",
            Self::FoodPreference => "food_preference",
        }
    }

    /// Whether the question is answered by picking one of its `options`.
    pub fn uses_options(self) -> bool {
        matches!(self, Self::MultipleChoice | Self::FoodPreference)
    }
}

// ---------------------------------------------------------------------------
// Question validation
// ---------------------------------------------------------------------------

/// Validate the organizer-editable fields of a question.
pub fn validate_question(
    question_type: QuestionType,
    title: &str,
    options: &[String],
    order_index: i32,
) -> Result<(), CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation(
            "Question title must not be empty".to_string(),
        ));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Question title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    if order_index < 0 {
        return Err(CoreError::Validation(format!(
            "order_index must be non-negative, got {order_index}"
        )));
    }
    validate_options(question_type, options)
}

/// Check the option list against the question type.
///
/// Choice-based types need at least [`MIN_CHOICES`] distinct, non-blank
/// options. All other types must not carry options.
pub fn validate_options(question_type: QuestionType, options: &[String]) -> Result<(), CoreError> {
    if !question_type.uses_options() {
        if !options.is_empty() {
            return Err(CoreError::Validation(format!(
                "Questions of type '{}' do not take options",
                question_type.as_str()
            )));
        }
        return Ok(());
    }

    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(CoreError::Validation(
            "Options must not be blank".to_string(),
        ));
    }
    if options.len() < MIN_CHOICES {
        return Err(CoreError::Validation(format!(
            "Questions of type '{}' need at least {MIN_CHOICES} options",
            question_type.as_str()
        )));
    }
    for (i, option) in options.iter().enumerate() {
        if options[..i].iter().any(|earlier| earlier.trim() == option.trim()) {
            return Err(CoreError::Validation(format!(
                "Duplicate option '{}'",
                option.trim()
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Answer validation
// ---------------------------------------------------------------------------

/// Validate a guest's answer to one question.
///
/// `answer` of `None` (or blank) is accepted only for optional questions.
pub fn validate_answer(
    question_type: QuestionType,
    title: &str,
    options: &[String],
    required: bool,
    answer: Option<&str>,
) -> Result<(), CoreError> {
    let answer = answer.map(str::trim).filter(|a| !a.is_empty());
    let Some(answer) = answer else {
        if required {
            return Err(CoreError::Validation(format!(
                "An answer is required for '{title}'"
            )));
        }
        return Ok(());
    };

    match question_type {
        QuestionType::YesNo | QuestionType::Attendance => {
            if answer != ANSWER_YES && answer != ANSWER_NO {
                return Err(CoreError::Validation(format!(
                    "Answer to '{title}' must be '{ANSWER_YES}' or '{ANSWER_NO}'"
                )));
            }
        }
        QuestionType::MultipleChoice | QuestionType::FoodPreference => {
            if !options.iter().any(|o| o.trim() == answer) {
                return Err(CoreError::Validation(format!(
                    "'{answer}' is not an option for '{title}'"
                )));
            }
        }
        QuestionType::Text => {
            if answer.chars().count() > MAX_TEXT_ANSWER_LEN {
                return Err(CoreError::Validation(format!(
                    "Answer to '{title}' must be at most {MAX_TEXT_ANSWER_LEN} characters"
                )));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reordering
// ---------------------------------------------------------------------------

/// Assign contiguous `order_index` values to ids in the given order.
///
/// Rejects duplicates so a reorder request cannot silently drop a question.
pub fn reorder_indices<T: PartialEq + Clone + std::fmt::Display>(
    ids: &[T],
) -> Result<Vec<(T, i32)>, CoreError> {
    let mut out = Vec::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        if ids[..i].contains(id) {
            return Err(CoreError::Validation(format!(
                "Question {id} listed more than once"
            )));
        }
        let index = i32::try_from(i)
            .map_err(|_| CoreError::Validation("Too many questions to reorder".to_string()))?;
        out.push((id.clone(), index));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn type_from_str_roundtrip() {
        for t in [
            QuestionType::YesNo,
            QuestionType::MultipleChoice,
            QuestionType::Text,
            QuestionType::Attendance,
            QuestionType::FoodPreference,
        ] {
            assert_eq!(QuestionType::from_str_db(t.as_str()).unwrap(), t);
        }
        assert!(QuestionType::from_str_db("rating").is_err());
    }

    #[test]
    fn type_serde_is_snake_case() {
        let json = serde_json::to_string(&QuestionType::MultipleChoice).unwrap();
        assert_eq!(json, "\"multiple_choice\"");
        let parsed: QuestionType = serde_json::from_str("\"food_preference\"").unwrap();
        assert_eq!(parsed, QuestionType::FoodPreference);
    }

    #[test]
    fn valid_text_question() {
        assert!(validate_question(QuestionType::Text, "Song request", &[], 0).is_ok());
    }

    #[test]
    fn blank_title_rejected() {
        assert!(validate_question(QuestionType::Text, "   ", &[], 0).is_err());
    }

    #[test]
    fn long_title_rejected() {
        let title = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_question(QuestionType::Text, &title, &[], 0).is_err());
        let title = "x".repeat(MAX_TITLE_LEN);
        assert!(validate_question(QuestionType::Text, &title, &[], 0).is_ok());
    }

    #[test]
    fn negative_order_index_rejected() {
        assert!(validate_question(QuestionType::Text, "Q", &[], -1).is_err());
    }

    #[test]
    fn multiple_choice_needs_two_distinct_options() {
        let t = QuestionType::MultipleChoice;
        assert!(validate_options(t, &opts(&["Beef", "Fish"])).is_ok());
        assert!(validate_options(t, &opts(&["Beef"])).is_err());
        assert!(validate_options(t, &opts(&["Beef", " Beef "])).is_err());
        assert!(validate_options(t, &opts(&["Beef", ""])).is_err());
    }

    #[test]
    fn non_choice_types_reject_options() {
        assert!(validate_options(QuestionType::YesNo, &opts(&["a", "b"])).is_err());
        assert!(validate_options(QuestionType::Text, &opts(&["a"])).is_err());
        assert!(validate_options(QuestionType::Attendance, &[]).is_ok());
    }

    #[test]
    fn required_answer_missing() {
        let err = validate_answer(QuestionType::Text, "Song", &[], true, None);
        assert!(err.is_err());
        let err = validate_answer(QuestionType::Text, "Song", &[], true, Some("  "));
        assert!(err.is_err());
    }

    #[test]
    fn optional_answer_missing_is_ok() {
        assert!(validate_answer(QuestionType::YesNo, "Q", &[], false, None).is_ok());
    }

    #[test]
    fn yes_no_answers() {
        let t = QuestionType::YesNo;
        assert!(validate_answer(t, "Q", &[], true, Some("yes")).is_ok());
        assert!(validate_answer(t, "Q", &[], true, Some("no")).is_ok());
        assert!(validate_answer(t, "Q", &[], true, Some("maybe")).is_err());
    }

    #[test]
    fn choice_answer_must_be_an_option() {
        let t = QuestionType::MultipleChoice;
        let options = opts(&["Beef", "Fish"]);
        assert!(validate_answer(t, "Main", &options, true, Some("Fish")).is_ok());
        assert!(validate_answer(t, "Main", &options, true, Some("Tofu")).is_err());
    }

    #[test]
    fn text_answer_length_limit() {
        let long = "a".repeat(MAX_TEXT_ANSWER_LEN + 1);
        assert!(validate_answer(QuestionType::Text, "Q", &[], false, Some(&long)).is_err());
    }

    #[test]
    fn reorder_assigns_contiguous_indices() {
        let out = reorder_indices(&["c", "a", "b"]).unwrap();
        assert_eq!(out, vec![("c", 0), ("a", 1), ("b", 2)]);
    }

    #[test]
    fn reorder_rejects_duplicates() {
        assert!(reorder_indices(&["a", "b", "a"]).is_err());
    }
}
