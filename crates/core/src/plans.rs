//! Subscription plans and feature gating.
//!
//! Every organizer is on exactly one [`Plan`]. Handlers consult
//! [`ensure_feature`] and [`ensure_within_limit`] before doing plan-gated
//! work; both return [`CoreError::PlanLimit`] on refusal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Free,
    Basic,
    Premium,
}

/// Plan-gated capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    CustomQuestions,
    Gallery,
    GuestUploads,
    PdfCollateral,
    QrCodes,
    SectionContent,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Self::CustomQuestions,
        Self::Gallery,
        Self::GuestUploads,
        Self::PdfCollateral,
        Self::QrCodes,
        Self::SectionContent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomQuestions => "custom_questions",
            Self::Gallery => "gallery",
            Self::GuestUploads => "guest_uploads",
            Self::PdfCollateral => "pdf_collateral",
            Self::QrCodes => "qr_codes",
            Self::SectionContent => "section_content",
        }
    }
}

/// Countable resources capped per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Guests,
    CustomQuestions,
    MediaItems,
}

impl Limit {
    fn label(self) -> &'static str {
        match self {
            Self::Guests => "guests",
            Self::CustomQuestions => "custom questions",
            Self::MediaItems => "media items",
        }
    }
}

impl Plan {
    /// Parse a plan string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "free" => Ok(Self::Free),
            "basic" => Ok(Self::Basic),
            "premium" => Ok(Self::Premium),
            _ => Err(CoreError::Validation(format!(
                "Invalid plan '{s}'. Must be one of: free, basic, premium"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Premium => "premium",
        }
    }

    pub fn allows(self, feature: Feature) -> bool {
        match self {
            Self::Free => matches!(feature, Feature::QrCodes),
            Self::Basic => !matches!(feature, Feature::GuestUploads | Feature::PdfCollateral),
            Self::Premium => true,
        }
    }

    /// Per-event cap for `limit`; `None` means unlimited.
    pub fn limit(self, limit: Limit) -> Option<i64> {
        match (self, limit) {
            (Self::Free, Limit::Guests) => Some(50),
            (Self::Free, Limit::CustomQuestions) => Some(0),
            (Self::Free, Limit::MediaItems) => Some(0),
            (Self::Basic, Limit::Guests) => Some(250),
            (Self::Basic, Limit::CustomQuestions) => Some(5),
            (Self::Basic, Limit::MediaItems) => Some(200),
            (Self::Premium, Limit::Guests) => None,
            (Self::Premium, Limit::CustomQuestions) => Some(25),
            (Self::Premium, Limit::MediaItems) => Some(2000),
        }
    }

    /// Features enabled on this plan, in declaration order.
    pub fn features(self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|f| self.allows(*f))
            .collect()
    }
}

/// Refuse with [`CoreError::PlanLimit`] unless `plan` includes `feature`.
pub fn ensure_feature(plan: Plan, feature: Feature) -> Result<(), CoreError> {
    if plan.allows(feature) {
        return Ok(());
    }
    Err(CoreError::PlanLimit(format!(
        "The {} plan does not include {}",
        plan.as_str(),
        feature.as_str()
    )))
}

/// Refuse when adding one more item would exceed the plan's cap.
pub fn ensure_within_limit(plan: Plan, limit: Limit, current: i64) -> Result<(), CoreError> {
    match plan.limit(limit) {
        Some(max) if current >= max => Err(CoreError::PlanLimit(format!(
            "The {} plan allows at most {max} {} per event",
            plan.as_str(),
            limit.label()
        ))),
        _ => Ok(()),
    }
}
