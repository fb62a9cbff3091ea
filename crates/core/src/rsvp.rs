//! Guest RSVP submissions.
//!
//! The fields of [`RsvpSubmission`] mirror the default invitation steps
//! (guests, attendance, after-party, food selection, accommodation,
//! transportation, note); custom question answers travel in `answers`,
//! keyed by question id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::custom_question::{validate_answer, QuestionType};
use crate::error::CoreError;

/// Largest party a single RSVP may cover.
pub const MAX_PARTY_SIZE: i32 = 10;

/// Maximum length of a guest name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of the closing note.
pub const MAX_NOTE_LEN: usize = 2000;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Pending,
    Attending,
    Declined,
}

impl RsvpStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "attending" => Ok(Self::Attending),
            "declined" => Ok(Self::Declined),
            _ => Err(CoreError::Validation(format!(
                "Invalid RSVP status '{s}'. Must be one of: pending, attending, declined"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Attending => "attending",
            Self::Declined => "declined",
        }
    }
}

// ---------------------------------------------------------------------------
// Questions as seen by validation
// ---------------------------------------------------------------------------

/// What RSVP validation needs to know about a custom question.
pub trait AnswerableQuestion {
    fn question_id(&self) -> String;
    /// The stored type string, parsed.
    fn question_type(&self) -> Result<QuestionType, CoreError>;
    fn title(&self) -> &str;
    fn options(&self) -> &[String];
    fn required(&self) -> bool;
    fn is_active(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

fn default_party_size() -> i32 {
    1
}

/// A guest's RSVP as posted from the public invitation flow.
#[derive(Debug, Clone, Deserialize)]
pub struct RsvpSubmission {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub attending: bool,
    #[serde(default = "default_party_size")]
    pub party_size: i32,
    pub attending_after_party: Option<bool>,
    pub food_preference: Option<String>,
    pub dietary_notes: Option<String>,
    pub needs_accommodation: Option<bool>,
    pub needs_transportation: Option<bool>,
    pub note: Option<String>,
    /// Custom question answers keyed by question id.
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

impl RsvpSubmission {
    pub fn status(&self) -> RsvpStatus {
        if self.attending {
            RsvpStatus::Attending
        } else {
            RsvpStatus::Declined
        }
    }

    /// Validate the submission against the event's custom questions.
    ///
    /// Required questions are enforced only for attending guests: a guest
    /// who declines skips straight to the closing note. Answers that are
    /// given are always checked, and answers to unknown or inactive
    /// questions are rejected.
    pub fn validate<Q: AnswerableQuestion>(&self, questions: &[Q]) -> Result<(), CoreError> {
        let name = self.full_name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("Guest name is required".to_string()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "Guest name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        if let Some(email) = self.email.as_deref().map(str::trim) {
            if !email.is_empty() && !looks_like_email(email) {
                return Err(CoreError::Validation(format!(
                    "'{email}' is not a valid email address"
                )));
            }
        }

        let min_party = if self.attending { 1 } else { 0 };
        if !(min_party..=MAX_PARTY_SIZE).contains(&self.party_size) {
            return Err(CoreError::Validation(format!(
                "party_size must be between {min_party} and {MAX_PARTY_SIZE}"
            )));
        }

        if let Some(note) = &self.note {
            if note.chars().count() > MAX_NOTE_LEN {
                return Err(CoreError::Validation(format!(
                    "Note must be at most {MAX_NOTE_LEN} characters"
                )));
            }
        }

        let active: Vec<&Q> = questions.iter().filter(|q| q.is_active()).collect();
        for question_id in self.answers.keys() {
            if !active.iter().any(|q| &q.question_id() == question_id) {
                return Err(CoreError::Validation(format!(
                    "Unknown question '{question_id}'"
                )));
            }
        }

        for question in active {
            let answer = self.answers.get(&question.question_id()).map(String::as_str);
            validate_answer(
                question.question_type()?,
                question.title(),
                question.options(),
                question.required() && self.attending,
                answer,
            )?;
        }
        Ok(())
    }

    /// Trim strings and clear attendance-only fields for declined guests.
    pub fn normalize(mut self) -> Self {
        self.full_name = self.full_name.trim().to_string();
        self.email = trimmed(self.email);
        self.phone = trimmed(self.phone);
        self.food_preference = trimmed(self.food_preference);
        self.dietary_notes = trimmed(self.dietary_notes);
        self.note = trimmed(self.note);
        self.answers = self
            .answers
            .into_iter()
            .filter_map(|(k, v)| {
                let v = v.trim().to_string();
                (!v.is_empty()).then_some((k, v))
            })
            .collect();

        if !self.attending {
            self.party_size = 0;
            self.attending_after_party = None;
            self.food_preference = None;
            self.dietary_notes = None;
            self.needs_accommodation = None;
            self.needs_transportation = None;
        }
        self
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Headcount across an event's guest list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RsvpSummary {
    pub total_invited: i64,
    pub attending: i64,
    pub declined: i64,
    pub pending: i64,
    /// Sum of party sizes for attending guests.
    pub expected_headcount: i64,
}

impl RsvpSummary {
    pub fn add(&mut self, status: RsvpStatus, party_size: i32) {
        self.total_invited += 1;
        match status {
            RsvpStatus::Attending => {
                self.attending += 1;
                self.expected_headcount += i64::from(party_size.max(0));
            }
            RsvpStatus::Declined => self.declined += 1,
            RsvpStatus::Pending => self.pending += 1,
        }
    }
}
