//! Organizer accounts.
//!
//! Identities are issued by the external auth provider; this table only
//! mirrors them so events and plans have something to hang off.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vowly_core::error::CoreError;
use vowly_core::plans::Plan;
use vowly_core::types::{DbId, Timestamp};

/// A row from the `organizers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organizer {
    pub id: DbId,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub plan: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Organizer {
    pub fn plan(&self) -> Result<Plan, CoreError> {
        Plan::from_str_db(&self.plan)
    }
}

/// DTO for updating the organizer's own profile. The plan is not editable here.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrganizer {
    pub email: Option<String>,
    pub display_name: Option<String>,
}
