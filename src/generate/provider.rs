/// Provider seam and progress reporting
///
/// A [`VisionProvider`] turns one [`GenerationRequest`] into a finished
/// [`Vision`], reporting observable progress along the way. Two
/// implementations exist: the real Runware task-array protocol and an
/// offline simulated provider, selectable at construction.

use async_trait::async_trait;
use iced::futures::channel::mpsc;
use iced::futures::SinkExt;

use crate::error::GenerateError;
use crate::generate::prompt;
use crate::goal::Goal;
use crate::state::data::{CapturedPhoto, Vision};

/// Stage labels shown while a generation is in flight
pub const STAGE_PREPARING: &str = "Preparing...";
pub const STAGE_AUTHENTICATING: &str = "Authenticating...";
pub const STAGE_UPLOADING: &str = "Uploading your photo...";
pub const STAGE_GENERATING: &str = "Generating your future vision...";
pub const STAGE_APPLYING_FACE: &str = "Applying your face to the vision...";
pub const STAGE_COMPLETE: &str = "Complete!";

/// Everything a provider needs for one generation
///
/// Exists only while the requester is in flight.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The captured photo as a self-contained data URL
    pub photo_data_url: String,
    /// The synthesized positive prompt
    pub prompt: String,
    /// The original goal text, carried into the resulting vision
    pub goal: String,
    /// Credential token for the provider
    pub api_key: String,
}

impl GenerationRequest {
    pub fn new(photo: &CapturedPhoto, goal: &Goal, api_key: String) -> Self {
        Self {
            photo_data_url: photo.data_url(),
            prompt: prompt::enhanced_prompt(goal.as_str()),
            goal: goal.as_str().to_string(),
            api_key,
        }
    }
}

/// One observable event from an in-flight generation
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// Progress advanced; percent is monotone non-decreasing in [0, 100]
    Progress { percent: u8, stage: String },
    /// The vision is ready; always the final event of a successful run
    Completed(Vision),
}

/// Forwards progress events to the UI while enforcing monotonicity
///
/// A provider may report stages in any order it likes; the reporter
/// guarantees the percent the UI sees never decreases.
pub struct ProgressReporter {
    sender: mpsc::Sender<GenerationEvent>,
    last: u8,
}

impl ProgressReporter {
    pub fn new(sender: mpsc::Sender<GenerationEvent>) -> Self {
        Self { sender, last: 0 }
    }

    /// Report a stage; the percent is clamped so it never goes backwards
    pub async fn report(&mut self, percent: u8, stage: &str) {
        let percent = percent.clamp(self.last, 100);
        self.last = percent;
        let _ = self
            .sender
            .send(GenerationEvent::Progress {
                percent,
                stage: stage.to_string(),
            })
            .await;
    }

    pub fn last_percent(&self) -> u8 {
        self.last
    }
}

/// An image generation service collaborator
///
/// Implementations run the multi-stage protocol and return the finished
/// vision, or fail with [`GenerateError::Failed`] on any step. At most
/// one call is in flight per workflow instance; the UI disables
/// re-submission while one is outstanding.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
        progress: &mut ProgressReporter,
    ) -> Result<Vision, GenerateError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::futures::StreamExt;

    #[tokio::test]
    async fn test_progress_never_decreases() {
        let (sender, mut receiver) = mpsc::channel(16);
        let mut reporter = ProgressReporter::new(sender);

        reporter.report(50, STAGE_GENERATING).await;
        reporter.report(10, STAGE_AUTHENTICATING).await;
        reporter.report(80, STAGE_APPLYING_FACE).await;
        drop(reporter);

        let mut seen = Vec::new();
        while let Some(GenerationEvent::Progress { percent, .. }) = receiver.next().await {
            seen.push(percent);
        }
        assert_eq!(seen, vec![50, 50, 80]);
    }

    #[tokio::test]
    async fn test_percent_is_capped_at_100() {
        let (sender, mut receiver) = mpsc::channel(16);
        let mut reporter = ProgressReporter::new(sender);

        reporter.report(250, STAGE_COMPLETE).await;
        assert_eq!(reporter.last_percent(), 100);
        drop(reporter);

        match receiver.next().await {
            Some(GenerationEvent::Progress { percent, .. }) => assert_eq!(percent, 100),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
