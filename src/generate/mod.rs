/// Vision generation module
///
/// This module handles:
/// - Prompt synthesis from the goal text (prompt.rs)
/// - The provider seam and progress reporting (provider.rs)
/// - The Runware task-array protocol (runware.rs)
/// - An offline simulated provider (simulated.rs)
/// - The requester that drives one generation as a progress stream
///   (requester.rs)

pub mod prompt;
pub mod provider;
pub mod requester;
pub mod runware;
pub mod simulated;

pub use provider::{
    GenerationEvent, GenerationRequest, ProgressReporter, VisionProvider, STAGE_APPLYING_FACE,
    STAGE_AUTHENTICATING, STAGE_COMPLETE, STAGE_GENERATING, STAGE_PREPARING, STAGE_UPLOADING,
};
pub use requester::generate;
pub use runware::RunwareProvider;
pub use simulated::SimulatedProvider;
