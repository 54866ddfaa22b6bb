/// Generation requester
///
/// Drives one generation against a provider and exposes it as a stream
/// of progress events, the shape `iced::Task::run` consumes. The
/// credential precondition is enforced here, before any provider work
/// happens, so an empty key never touches the network.

use std::sync::Arc;

use iced::futures::{SinkExt, Stream};
use iced::stream::try_channel;

use crate::error::GenerateError;
use crate::generate::provider::{
    GenerationEvent, GenerationRequest, ProgressReporter, VisionProvider, STAGE_COMPLETE,
};

/// Run one generation, yielding progress events and finally either a
/// [`GenerationEvent::Completed`] or an error item.
///
/// At most one of these streams should be in flight per workflow; the UI
/// disables re-submission while one is outstanding.
pub fn generate(
    provider: Arc<dyn VisionProvider>,
    request: GenerationRequest,
) -> impl Stream<Item = Result<GenerationEvent, GenerateError>> {
    try_channel(10, move |mut output| async move {
        if request.api_key.trim().is_empty() {
            return Err(GenerateError::MissingCredential);
        }

        let mut progress = ProgressReporter::new(output.clone());
        let vision = provider.generate(&request, &mut progress).await?;

        progress.report(100, STAGE_COMPLETE).await;
        let _ = output.send(GenerationEvent::Completed(vision)).await;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use iced::futures::StreamExt;

    use crate::generate::simulated::SimulatedProvider;
    use crate::state::data::Vision;

    fn request(api_key: &str) -> GenerationRequest {
        GenerationRequest {
            photo_data_url: "data:image/jpeg;base64,AAAA".to_string(),
            prompt: "a prompt".to_string(),
            goal: "Running my own bakery".to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Counts invocations so tests can assert nothing was called
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl VisionProvider for CountingProvider {
        async fn generate(
            &self,
            request: &GenerationRequest,
            _progress: &mut ProgressReporter,
        ) -> Result<Vision, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vision::new("url".to_string(), request.goal.clone()))
        }
    }

    #[tokio::test]
    async fn test_empty_credential_fails_without_touching_the_provider() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });

        let events: Vec<_> = generate(provider.clone(), request("   ")).collect().await;

        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            Err(GenerateError::MissingCredential)
        ));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_run_ends_at_100_with_a_vision() {
        let provider = Arc::new(SimulatedProvider::new(std::time::Duration::ZERO));

        let events: Vec<_> = generate(provider, request("rw-key")).collect().await;

        let mut last_percent = 0;
        let mut completed = None;
        for event in events {
            match event.expect("no errors expected") {
                GenerationEvent::Progress { percent, .. } => {
                    assert!(percent >= last_percent, "progress went backwards");
                    last_percent = percent;
                }
                GenerationEvent::Completed(vision) => completed = Some(vision),
            }
        }

        assert_eq!(last_percent, 100);
        let vision = completed.expect("stream should end with a vision");
        assert_eq!(vision.goal, "Running my own bakery");
        assert!(vision.image_url.starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_as_an_error_item() {
        let provider = Arc::new(SimulatedProvider::failing("upstream exploded"));

        let events: Vec<_> = generate(provider, request("rw-key")).collect().await;

        let last = events.last().expect("stream should not be empty");
        assert_eq!(
            last.as_ref().unwrap_err(),
            &GenerateError::Failed("upstream exploded".to_string())
        );
    }
}
