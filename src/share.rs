/// Share collaborator
///
/// Best-effort sharing of a vision. Desktop platforms have no native
/// share sheet, so [`native_share`] reports unavailable and the caller
/// falls back to copying a textual summary to the clipboard. Share
/// failures never block the workflow.

use crate::error::ShareError;
use crate::state::data::Vision;

/// Attempt a native platform share
pub fn native_share(_vision: &Vision) -> Result<(), ShareError> {
    // No share sheet on desktop; callers fall back to the clipboard.
    Err(ShareError::Unavailable)
}

/// Textual summary used for the clipboard fallback
pub fn share_summary(vision: &Vision) -> String {
    format!("My vision: {} - {}", vision.goal, vision.image_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_contains_goal_and_reference() {
        let vision = Vision::new(
            "https://im.runware.ai/x.webp".to_string(),
            "Publishing my first bestselling novel".to_string(),
        );
        assert_eq!(
            share_summary(&vision),
            "My vision: Publishing my first bestselling novel - https://im.runware.ai/x.webp"
        );
    }

    #[test]
    fn test_native_share_is_unavailable_on_desktop() {
        let vision = Vision::new("url".to_string(), "goal".to_string());
        assert_eq!(native_share(&vision), Err(ShareError::Unavailable));
    }
}
