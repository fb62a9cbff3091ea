//! Event microsite sections: visibility toggles and content overrides.
//!
//! The public page is composed from a fixed table of sections. Organizers
//! may hide or show each one, move it, and override its content; overrides
//! are stored sparsely and merged over the defaults at read time.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CoreError;
use crate::plans::{Feature, Plan};

/// Upper bound on the serialized size of one section's content override.
pub const MAX_CONTENT_BYTES: usize = 16 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Hero,
    OurStory,
    Schedule,
    Venue,
    Gallery,
    Rsvp,
    Accommodation,
    Transportation,
    Registry,
    Faq,
}

impl Section {
    /// All sections in default page order.
    pub const ALL: [Section; 10] = [
        Self::Hero,
        Self::OurStory,
        Self::Schedule,
        Self::Venue,
        Self::Gallery,
        Self::Rsvp,
        Self::Accommodation,
        Self::Transportation,
        Self::Registry,
        Self::Faq,
    ];

    /// Parse a section name from the database or a path segment.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown section '{s}'")))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::OurStory => "our_story",
            Self::Schedule => "schedule",
            Self::Venue => "venue",
            Self::Gallery => "gallery",
            Self::Rsvp => "rsvp",
            Self::Accommodation => "accommodation",
            Self::Transportation => "transportation",
            Self::Registry => "registry",
            Self::Faq => "faq",
        }
    }

    /// Shown on a fresh event unless the organizer hides it.
    pub fn visible_by_default(self) -> bool {
        !matches!(self, Self::Registry | Self::Faq)
    }

    pub fn default_sort_order(self) -> i32 {
        Self::ALL
            .iter()
            .position(|s| *s == self)
            .map_or(0, |i| i as i32 * 10)
    }

    pub fn default_content(self) -> Value {
        match self {
            Self::Hero => json!({ "heading": "We're getting married!", "show_countdown": true }),
            Self::OurStory => json!({ "heading": "Our Story", "body": "" }),
            Self::Schedule => json!({ "heading": "Schedule", "items": [] }),
            Self::Venue => json!({ "heading": "Venue", "show_map": true }),
            Self::Gallery => json!({ "heading": "Gallery", "layout": "grid" }),
            Self::Rsvp => json!({ "heading": "RSVP", "button_label": "Respond" }),
            Self::Accommodation => json!({ "heading": "Where to Stay", "hotels": [] }),
            Self::Transportation => json!({ "heading": "Getting There", "body": "" }),
            Self::Registry => json!({ "heading": "Registry", "links": [] }),
            Self::Faq => json!({ "heading": "FAQ", "entries": [] }),
        }
    }

    /// Feature a plan must include for this section to render at all.
    fn required_feature(self) -> Option<Feature> {
        match self {
            Self::Gallery => Some(Feature::Gallery),
            _ => None,
        }
    }
}

/// An organizer's stored settings for one section. `None` fields fall back
/// to the section defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOverride {
    pub section: Section,
    pub is_visible: Option<bool>,
    pub content: Option<Value>,
    pub sort_order: Option<i32>,
}

/// A section after defaults, overrides, and plan gating are applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSection {
    pub section: Section,
    pub is_visible: bool,
    pub sort_order: i32,
    pub content: Value,
    /// `false` when the plan does not cover the section; it never renders.
    pub available: bool,
}

/// Validate a content override before it is stored.
pub fn validate_content(content: &Value) -> Result<(), CoreError> {
    if !content.is_object() {
        return Err(CoreError::Validation(
            "Section content must be a JSON object".to_string(),
        ));
    }
    let size = content.to_string().len();
    if size > MAX_CONTENT_BYTES {
        return Err(CoreError::Validation(format!(
            "Section content is {size} bytes; the limit is {MAX_CONTENT_BYTES}"
        )));
    }
    Ok(())
}

/// Shallow-merge `overlay` keys over `base`. Non-object overlays are ignored.
fn merge_content(base: Value, overlay: Option<&Value>) -> Value {
    let (Value::Object(mut merged), Some(Value::Object(extra))) = (base.clone(), overlay) else {
        return base;
    };
    for (key, value) in extra {
        merged.insert(key.clone(), value.clone());
    }
    Value::Object(merged)
}

/// Resolve every section, hidden ones included, in page order.
///
/// Content overrides are honoured only when the plan includes
/// [`Feature::SectionContent`]; visibility and ordering are always editable.
pub fn resolve_sections(overrides: &[SectionOverride], plan: Plan) -> Vec<ResolvedSection> {
    let content_editable = plan.allows(Feature::SectionContent);

    let mut resolved: Vec<ResolvedSection> = Section::ALL
        .into_iter()
        .map(|section| {
            let stored = overrides.iter().find(|o| o.section == section);
            let available = section
                .required_feature()
                .map_or(true, |feature| plan.allows(feature));
            let overlay = stored
                .and_then(|o| o.content.as_ref())
                .filter(|_| content_editable);

            ResolvedSection {
                section,
                is_visible: stored
                    .and_then(|o| o.is_visible)
                    .unwrap_or_else(|| section.visible_by_default()),
                sort_order: stored
                    .and_then(|o| o.sort_order)
                    .unwrap_or_else(|| section.default_sort_order()),
                content: merge_content(section.default_content(), overlay),
                available,
            }
        })
        .collect();

    // Stable: ties keep the default table order.
    resolved.sort_by_key(|s| s.sort_order);
    resolved
}

/// The sections that actually render on the public page.
pub fn compose_page(overrides: &[SectionOverride], plan: Plan) -> Vec<ResolvedSection> {
    resolve_sections(overrides, plan)
        .into_iter()
        .filter(|s| s.is_visible && s.available)
        .collect()
}
