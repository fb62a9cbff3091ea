//! Gallery media metadata.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vowly_core::types::{DbId, Timestamp};

/// A row from the `media_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaItem {
    pub id: DbId,
    pub event_id: DbId,
    /// Object-storage key the client uploads the bytes to.
    pub storage_key: String,
    pub content_type: String,
    pub byte_size: i64,
    pub caption: Option<String>,
    pub uploaded_by_guest: bool,
    pub is_visible: bool,
    pub created_at: Timestamp,
}

/// DTO for registering an upload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterMedia {
    pub content_type: String,
    pub byte_size: i64,
    pub caption: Option<String>,
}

/// DTO for curating a media item.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMedia {
    pub caption: Option<String>,
    pub is_visible: Option<bool>,
}
