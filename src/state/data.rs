/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the workflow state machine and the UI layer.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An encoded still image taken from the camera
///
/// Immutable once created; a retake replaces it entirely. The JPEG bytes
/// are the canonical payload, with a data URL rendered on demand for the
/// generation provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    /// JPEG-encoded image data
    pub jpeg: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

impl CapturedPhoto {
    /// Render the photo as a `data:image/jpeg;base64,...` URL
    ///
    /// This is the self-contained form the generation provider accepts
    /// for reference uploads.
    pub fn data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", BASE64.encode(&self.jpeg))
    }
}

/// A completed AI-generated vision tied to a goal
///
/// Immutable once created. Owned by the gallery for the whole session;
/// there is no persistence, so visions are lost on exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vision {
    /// Unique identifier, generated at creation
    pub id: Uuid,
    /// Reference to the resulting image (URL or data URL)
    pub image_url: String,
    /// The goal text this vision was generated for
    pub goal: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Vision {
    /// Create a new vision with a fresh id and the current timestamp
    pub fn new(image_url: String, goal: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            image_url,
            goal,
            created_at: Utc::now(),
        }
    }

    /// Format the creation timestamp for the gallery card,
    /// e.g. "Mar  4, 2026 02:15 PM"
    pub fn formatted_date(&self) -> String {
        self.created_at.format("%b %e, %Y %I:%M %p").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_has_jpeg_prefix() {
        let photo = CapturedPhoto {
            jpeg: vec![0xFF, 0xD8, 0xFF, 0xE0],
            width: 640,
            height: 480,
        };
        let url = photo.data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert!(url.len() > "data:image/jpeg;base64,".len());
    }

    #[test]
    fn test_vision_ids_are_unique() {
        let a = Vision::new("https://example.com/a.webp".into(), "goal one is long".into());
        let b = Vision::new("https://example.com/b.webp".into(), "goal two is long".into());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_formatted_date_contains_year() {
        let vision = Vision::new("url".into(), "goal".into());
        let formatted = vision.formatted_date();
        assert!(formatted.contains(&Utc::now().format("%Y").to_string()));
    }
}
