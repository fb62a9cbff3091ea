//! Per-event section override model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use vowly_core::error::CoreError;
use vowly_core::sections::{Section, SectionOverride};
use vowly_core::types::{DbId, Timestamp};

/// A row from the `event_sections` table. `None` columns mean "use default".
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventSection {
    pub event_id: DbId,
    pub section: String,
    pub is_visible: Option<bool>,
    pub content: Option<Json<Value>>,
    pub sort_order: Option<i32>,
    pub updated_at: Timestamp,
}

impl EventSection {
    pub fn to_override(&self) -> Result<SectionOverride, CoreError> {
        Ok(SectionOverride {
            section: Section::from_str_db(&self.section)?,
            is_visible: self.is_visible,
            content: self.content.as_ref().map(|c| c.0.clone()),
            sort_order: self.sort_order,
        })
    }
}

/// DTO for upserting a section override. Omitted fields keep their stored value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSection {
    pub is_visible: Option<bool>,
    pub content: Option<Value>,
    pub sort_order: Option<i32>,
}
