/// Error taxonomy for the whole workflow
///
/// Every error here is recoverable: validation errors are shown inline,
/// camera and generation errors leave the user in the same step to retry,
/// and share/download errors never block the workflow.
///
/// All variants are `Clone` because errors travel inside iced messages.

use thiserror::Error;

/// Camera acquisition and capture errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CameraError {
    /// Permission was denied or no camera device is present
    #[error("Unable to access camera: {0}")]
    Unavailable(String),

    /// A frame was requested from a stream that is no longer active
    #[error("No active camera stream")]
    NotStreaming,
}

/// Goal validation errors, recovered inline without advancing the flow
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GoalError {
    /// The trimmed goal text was empty (checked before the length test
    /// so the user gets the right message)
    #[error("Please enter your goal first!")]
    Empty,

    /// The trimmed goal text was shorter than the minimum
    #[error("Please provide a more detailed goal (at least {min} characters)")]
    TooShort { min: usize },

    /// The trimmed goal text exceeded the input ceiling
    #[error("Please keep your goal under {max} characters")]
    TooLong { max: usize },
}

/// Vision generation errors from the provider protocol
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// No credential token was supplied; nothing was sent to the provider
    #[error("Please enter your Runware API key")]
    MissingCredential,

    /// Any step of the protocol failed (auth, upload, inference, or a
    /// result without an image reference)
    #[error("Failed to generate vision: {0}")]
    Failed(String),
}

/// Best-effort sharing errors, never fatal
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShareError {
    /// The platform has no native share facility; callers fall back to
    /// copying a textual summary to the clipboard
    #[error("Sharing is not available on this platform")]
    Unavailable,
}

/// Image download errors, never fatal
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DownloadError {
    #[error("Failed to download image: {0}")]
    Failed(String),
}
