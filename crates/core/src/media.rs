//! Gallery media rules.
//!
//! Media bytes go straight to external object storage; this service only
//! records metadata. These helpers decide which uploads are acceptable and
//! where in the bucket they belong.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum size of an image upload (20 MiB).
pub const MAX_IMAGE_BYTES: i64 = 20 * 1024 * 1024;

/// Maximum size of a video upload (200 MiB).
pub const MAX_VIDEO_BYTES: i64 = 200 * 1024 * 1024;

/// Maximum length of a caption.
pub const MAX_CAPTION_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Map an accepted MIME type to its kind and canonical file extension.
pub fn classify_content_type(content_type: &str) -> Option<(MediaKind, &'static str)> {
    match content_type.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Some((MediaKind::Image, "jpg")),
        "image/png" => Some((MediaKind::Image, "png")),
        "image/webp" => Some((MediaKind::Image, "webp")),
        "image/heic" => Some((MediaKind::Image, "heic")),
        "image/gif" => Some((MediaKind::Image, "gif")),
        "video/mp4" => Some((MediaKind::Video, "mp4")),
        _ => None,
    }
}

/// Validate an upload's declared type, size, and caption.
///
/// Returns the canonical file extension for the storage key.
pub fn validate_upload(
    content_type: &str,
    byte_size: i64,
    caption: Option<&str>,
) -> Result<&'static str, CoreError> {
    let (kind, ext) = classify_content_type(content_type).ok_or_else(|| {
        CoreError::Validation(format!("Unsupported media type '{content_type}'"))
    })?;

    let max = match kind {
        MediaKind::Image => MAX_IMAGE_BYTES,
        MediaKind::Video => MAX_VIDEO_BYTES,
    };
    if byte_size <= 0 {
        return Err(CoreError::Validation(
            "byte_size must be positive".to_string(),
        ));
    }
    if byte_size > max {
        return Err(CoreError::Validation(format!(
            "File is {byte_size} bytes; the limit for this type is {max}"
        )));
    }

    validate_caption(caption)?;
    Ok(ext)
}

pub fn validate_caption(caption: Option<&str>) -> Result<(), CoreError> {
    if caption.is_some_and(|c| c.chars().count() > MAX_CAPTION_LEN) {
        return Err(CoreError::Validation(format!(
            "Caption must be at most {MAX_CAPTION_LEN} characters"
        )));
    }
    Ok(())
}

/// Object-storage key: `events/{event_id}/media/{media_id}.{ext}`.
pub fn storage_key(event_id: DbId, media_id: DbId, ext: &str) -> String {
    format!("events/{event_id}/media/{media_id}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn classify_known_types() {
        assert_eq!(
            classify_content_type("IMAGE/JPEG"),
            Some((MediaKind::Image, "jpg"))
        );
        assert_eq!(
            classify_content_type("video/mp4"),
            Some((MediaKind::Video, "mp4"))
        );
        assert_eq!(classify_content_type("application/pdf"), None);
    }

    #[test]
    fn image_size_limit() {
        assert_eq!(validate_upload("image/png", MAX_IMAGE_BYTES, None).unwrap(), "png");
        assert!(validate_upload("image/png", MAX_IMAGE_BYTES + 1, None).is_err());
    }

    #[test]
    fn video_allows_larger_files() {
        assert!(validate_upload("video/mp4", MAX_IMAGE_BYTES * 2, None).is_ok());
    }

    #[test]
    fn zero_size_rejected() {
        assert!(validate_upload("image/png", 0, None).is_err());
    }

    #[test]
    fn long_caption_rejected() {
        let caption = "c".repeat(MAX_CAPTION_LEN + 1);
        assert!(validate_upload("image/png", 10, Some(&caption)).is_err());
    }

    #[test]
    fn storage_key_layout() {
        let event = Uuid::nil();
        let media = Uuid::from_u128(1);
        assert_eq!(
            storage_key(event, media, "jpg"),
            format!("events/{event}/media/{media}.jpg")
        );
    }
}
