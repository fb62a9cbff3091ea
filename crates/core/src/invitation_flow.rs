//! Invitation (RSVP) flow resolver.
//!
//! A guest answering an invitation walks through an ordered list of pages:
//! eight fixed default steps, with the event's active custom questions
//! slotted in between `transportation` and `note`. The list is rebuilt from
//! the caller-supplied questions on every query, so it always reflects the
//! current `is_active` / `order_index` state. Nothing here is cached,
//! persisted, or fallible: unknown ids and flow boundaries are reported as
//! `None`, never as errors.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Default steps
// ---------------------------------------------------------------------------

/// The fixed built-in pages of the invitation flow, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultStep {
    Guests,
    Attendance,
    AfterParty,
    FoodSelection,
    Accommodation,
    Transportation,
    Note,
    Confirmation,
}

/// Number of default steps. Every flow has at least this many steps.
pub const DEFAULT_STEP_COUNT: usize = 8;

/// Sort bucket shared by all custom-question steps. Sits after
/// `transportation` (5) and before `note` (7).
const CUSTOM_BUCKET: u8 = 6;

/// Prefix that forces an id to be looked up as a custom question even when
/// it collides with a default step id (e.g. `custom:note`).
pub const CUSTOM_ID_PREFIX: &str = "custom:";

impl DefaultStep {
    /// All default steps in flow order.
    pub const ALL: [DefaultStep; DEFAULT_STEP_COUNT] = [
        Self::Guests,
        Self::Attendance,
        Self::AfterParty,
        Self::FoodSelection,
        Self::Accommodation,
        Self::Transportation,
        Self::Note,
        Self::Confirmation,
    ];

    /// Stable external identifier, also used as the path suffix.
    pub fn id(self) -> &'static str {
        match self {
            Self::Guests => "guests",
            Self::Attendance => "attendance",
            Self::AfterParty => "after-party",
            Self::FoodSelection => "food-selection",
            Self::Accommodation => "accommodation",
            Self::Transportation => "transportation",
            Self::Note => "note",
            Self::Confirmation => "confirmation",
        }
    }

    /// Human-readable label for the step.
    pub fn title(self) -> &'static str {
        match self {
            Self::Guests => "Guests",
            Self::Attendance => "Attendance",
            Self::AfterParty => "After Party",
            Self::FoodSelection => "Food Selection",
            Self::Accommodation => "Accommodation",
            Self::Transportation => "Transportation",
            Self::Note => "Note",
            Self::Confirmation => "Confirmation",
        }
    }

    /// Parse an external identifier back into a default step.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.id() == id)
    }

    fn bucket(self) -> u8 {
        match self {
            Self::Guests => 0,
            Self::Attendance => 1,
            Self::AfterParty => 2,
            Self::FoodSelection => 3,
            Self::Accommodation => 4,
            Self::Transportation => 5,
            Self::Note => 7,
            Self::Confirmation => 8,
        }
    }

    fn path(self, www_id: &str) -> String {
        let base = invitation_base_path(www_id);
        match self {
            // The entry step lives at the bare invitation route.
            Self::Guests => base,
            other => format!("{base}/{}", other.id()),
        }
    }
}

// ---------------------------------------------------------------------------
// Step model
// ---------------------------------------------------------------------------

/// Discriminates built-in pages from organizer-defined questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Default,
    Custom,
}

/// Namespaced step identity.
///
/// Custom question ids are opaque and could in principle equal a default id
/// such as `"note"`; keeping the kind in the key keeps lookups unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepKey {
    Default(DefaultStep),
    Custom(String),
}

impl StepKey {
    /// Resolve an external step id.
    ///
    /// Default ids win over custom ids. A `custom:` prefix selects the custom
    /// namespace explicitly; any other unrecognised id is treated as a
    /// custom question id.
    pub fn parse(id: &str) -> Self {
        if let Some(question_id) = id.strip_prefix(CUSTOM_ID_PREFIX) {
            return Self::Custom(question_id.to_string());
        }
        match DefaultStep::from_id(id) {
            Some(step) => Self::Default(step),
            None => Self::Custom(id.to_string()),
        }
    }

    /// Fully-qualified form, e.g. `default:note` or `custom:<uuid>`.
    pub fn qualified(&self) -> String {
        match self {
            Self::Default(step) => format!("default:{}", step.id()),
            Self::Custom(id) => format!("{CUSTOM_ID_PREFIX}{id}"),
        }
    }
}

/// One page of the invitation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Default step literal, or the custom question id.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Navigable route scoped under the event's public id.
    pub path: String,
    pub title: String,
    #[serde(skip)]
    key: StepKey,
    /// `(bucket, order within bucket)`; compared lexicographically.
    #[serde(skip)]
    sort_key: (u8, i64),
}

impl Step {
    fn default_step(step: DefaultStep, www_id: &str) -> Self {
        Self {
            id: step.id().to_string(),
            kind: StepKind::Default,
            path: step.path(www_id),
            title: step.title().to_string(),
            key: StepKey::Default(step),
            sort_key: (step.bucket(), 0),
        }
    }

    fn custom_step<Q: FlowQuestion + ?Sized>(question: &Q, www_id: &str) -> Self {
        let id = question.step_id();
        Self {
            path: custom_question_path(www_id, &id),
            title: question.title().to_string(),
            kind: StepKind::Custom,
            key: StepKey::Custom(id.clone()),
            sort_key: (CUSTOM_BUCKET, i64::from(question.order_index())),
            id,
        }
    }

    /// Namespaced identity of this step.
    pub fn key(&self) -> &StepKey {
        &self.key
    }

    /// Ordering key `(bucket, order_index)`. Default steps use their fixed
    /// bucket with order 0; custom steps share one bucket and carry the
    /// question's `order_index`.
    pub fn order_key(&self) -> (u8, i64) {
        self.sort_key
    }
}

/// What the resolver needs to know about a custom question.
///
/// Implemented by the persisted question row in the `db` crate; kept as a
/// trait so this crate stays free of storage types.
pub trait FlowQuestion {
    /// Identifier used as the step id and in the step path.
    fn step_id(&self) -> String;
    fn title(&self) -> &str;
    fn order_index(&self) -> i32;
    fn is_active(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `/event-id/{www_id}/invitation`
pub fn invitation_base_path(www_id: &str) -> String {
    format!("/event-id/{www_id}/invitation")
}

/// `/event-id/{www_id}/invitation/custom-question/{question_id}`
pub fn custom_question_path(www_id: &str, question_id: &str) -> String {
    format!("{}/custom-question/{question_id}", invitation_base_path(www_id))
}

// ---------------------------------------------------------------------------
// Resolved flow
// ---------------------------------------------------------------------------

/// Position of one step within a flow, for progress display and navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepNavigation {
    pub step: Step,
    /// Zero-based position in the flow.
    pub index: usize,
    pub total: usize,
    pub is_last: bool,
    pub next_path: Option<String>,
    pub previous_path: Option<String>,
}

/// The ordered list of steps for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InvitationFlow {
    steps: Vec<Step>,
}

impl InvitationFlow {
    /// Merge the default steps with one step per active custom question.
    ///
    /// Inactive questions are dropped here even though callers are expected
    /// to pre-filter. Custom steps are ordered by `order_index`; equal
    /// indices keep their input order (`sort_by_key` is stable).
    pub fn build<Q: FlowQuestion>(questions: &[Q], www_id: &str) -> Self {
        let mut steps: Vec<Step> = DefaultStep::ALL
            .into_iter()
            .map(|step| Step::default_step(step, www_id))
            .collect();

        steps.extend(
            questions
                .iter()
                .filter(|q| q.is_active())
                .map(|q| Step::custom_step(q, www_id)),
        );

        steps.sort_by_key(|step| step.sort_key);
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false` for a built flow; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Zero-based position of `step_id`, or `None` if it is not in the flow.
    ///
    /// A custom question whose raw id itself starts with `custom:` is still
    /// found by that raw id when the prefixed lookup matches nothing.
    pub fn position(&self, step_id: &str) -> Option<usize> {
        let key = StepKey::parse(step_id);
        self.steps
            .iter()
            .position(|step| step.key == key)
            .or_else(|| {
                self.steps
                    .iter()
                    .position(|step| step.kind == StepKind::Custom && step.id == step_id)
            })
    }

    pub fn get(&self, step_id: &str) -> Option<&Step> {
        self.position(step_id).map(|i| &self.steps[i])
    }

    /// Path of the step after `step_id`; `None` when unknown or last.
    pub fn next_path(&self, step_id: &str) -> Option<&str> {
        let index = self.position(step_id)?;
        self.steps.get(index + 1).map(|step| step.path.as_str())
    }

    /// Path of the step before `step_id`; `None` when unknown or first.
    pub fn previous_path(&self, step_id: &str) -> Option<&str> {
        let index = self.position(step_id)?;
        let previous = index.checked_sub(1)?;
        self.steps.get(previous).map(|step| step.path.as_str())
    }

    /// Whether `step_id` names the final step. An empty flow has no last
    /// step, so this is `false` there.
    pub fn is_last(&self, step_id: &str) -> bool {
        self.position(step_id)
            .is_some_and(|index| index + 1 == self.steps.len())
    }

    /// Everything a page needs to render progress and next/back links.
    pub fn navigation(&self, step_id: &str) -> Option<StepNavigation> {
        let index = self.position(step_id)?;
        Some(StepNavigation {
            step: self.steps[index].clone(),
            index,
            total: self.steps.len(),
            is_last: index + 1 == self.steps.len(),
            next_path: self.next_path(step_id).map(str::to_string),
            previous_path: self.previous_path(step_id).map(str::to_string),
        })
    }
}

// ---------------------------------------------------------------------------
// One-shot helpers
// ---------------------------------------------------------------------------

/// Build the ordered step list for an event.
pub fn build_flow<Q: FlowQuestion>(questions: &[Q], www_id: &str) -> Vec<Step> {
    InvitationFlow::build(questions, www_id).steps
}

pub fn next_path<Q: FlowQuestion>(step_id: &str, questions: &[Q], www_id: &str) -> Option<String> {
    InvitationFlow::build(questions, www_id)
        .next_path(step_id)
        .map(str::to_string)
}

pub fn previous_path<Q: FlowQuestion>(
    step_id: &str,
    questions: &[Q],
    www_id: &str,
) -> Option<String> {
    InvitationFlow::build(questions, www_id)
        .previous_path(step_id)
        .map(str::to_string)
}

pub fn is_last_step<Q: FlowQuestion>(step_id: &str, questions: &[Q], www_id: &str) -> bool {
    InvitationFlow::build(questions, www_id).is_last(step_id)
}

pub fn step_index<Q: FlowQuestion>(
    step_id: &str,
    questions: &[Q],
    www_id: &str,
) -> Option<usize> {
    InvitationFlow::build(questions, www_id).position(step_id)
}

/// `DEFAULT_STEP_COUNT` plus the number of active questions.
pub fn total_steps<Q: FlowQuestion>(questions: &[Q], www_id: &str) -> usize {
    InvitationFlow::build(questions, www_id).len()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
