/// Simulated generation provider
///
/// Walks the same stages as the real protocol with timed ticks and no
/// network, resolving to the captured photo itself as the image
/// reference. Useful for development without an API key and for tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::GenerateError;
use crate::generate::provider::{
    GenerationRequest, ProgressReporter, VisionProvider, STAGE_APPLYING_FACE,
    STAGE_AUTHENTICATING, STAGE_GENERATING, STAGE_UPLOADING,
};
use crate::state::data::Vision;

const DEFAULT_TICK: Duration = Duration::from_millis(600);

pub struct SimulatedProvider {
    tick: Duration,
    fail_with: Option<String>,
}

impl SimulatedProvider {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            fail_with: None,
        }
    }

    /// A provider that fails at the generation stage, for exercising the
    /// error path without a network
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            tick: Duration::ZERO,
            fail_with: Some(reason.into()),
        }
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

#[async_trait]
impl VisionProvider for SimulatedProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
        progress: &mut ProgressReporter,
    ) -> Result<Vision, GenerateError> {
        let stages = [
            (10, STAGE_AUTHENTICATING),
            (25, STAGE_UPLOADING),
            (50, STAGE_GENERATING),
            (80, STAGE_APPLYING_FACE),
        ];

        for (percent, stage) in stages {
            progress.report(percent, stage).await;
            if !self.tick.is_zero() {
                tokio::time::sleep(self.tick).await;
            }
            if percent == 50 {
                if let Some(reason) = &self.fail_with {
                    return Err(GenerateError::Failed(reason.clone()));
                }
            }
        }

        Ok(Vision::new(
            request.photo_data_url.clone(),
            request.goal.clone(),
        ))
    }
}
