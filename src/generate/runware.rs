/// Runware task-array protocol
///
/// The provider accepts a JSON array of typed task descriptors posted to
/// a single HTTPS endpoint. One generation is four round trips:
/// authenticate, upload the reference photo, submit the image inference
/// (chained with a face swap when an upload handle exists), and inspect
/// the response for the resulting image URL.

use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::GenerateError;
use crate::generate::provider::{
    GenerationRequest, ProgressReporter, VisionProvider, STAGE_APPLYING_FACE,
    STAGE_AUTHENTICATING, STAGE_GENERATING, STAGE_UPLOADING,
};
use crate::state::data::Vision;

/// Production endpoint
pub const RUNWARE_API_URL: &str = "https://api.runware.ai/v1";

const MODEL: &str = "runware:100@1";
const OUTPUT_SIZE: u32 = 1024;

pub struct RunwareProvider {
    client: reqwest::Client,
    api_url: String,
}

impl RunwareProvider {
    pub fn new() -> Self {
        Self::with_url(RUNWARE_API_URL.to_string())
    }

    /// Target a different endpoint (useful against a local mock)
    pub fn with_url(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Post a task array and parse the response envelope.
    /// Non-2xx statuses and error payloads both become `Failed`.
    async fn post_tasks(&self, tasks: Value) -> Result<TaskResponse, GenerateError> {
        let response = self
            .client
            .post(&self.api_url)
            .json(&tasks)
            .send()
            .await
            .map_err(|e| GenerateError::Failed(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenerateError::Failed(format!(
                "provider returned {status}: {body}"
            )));
        }

        let payload = response
            .json::<TaskResponse>()
            .await
            .map_err(|e| GenerateError::Failed(format!("invalid response payload: {e}")))?;

        payload.ensure_ok()?;
        Ok(payload)
    }
}

impl Default for RunwareProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn auth_task(api_key: &str) -> Value {
    json!({
        "taskType": "authentication",
        "apiKey": api_key,
    })
}

#[async_trait]
impl VisionProvider for RunwareProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
        progress: &mut ProgressReporter,
    ) -> Result<Vision, GenerateError> {
        // Step 1: authenticate
        progress.report(10, STAGE_AUTHENTICATING).await;
        self.post_tasks(json!([auth_task(&request.api_key)]))
            .await
            .map_err(|_| {
                GenerateError::Failed("Authentication failed. Please check your API key.".into())
            })?;

        // Step 2: upload the reference photo to obtain a handle
        progress.report(25, STAGE_UPLOADING).await;
        let upload = self
            .post_tasks(json!([
                auth_task(&request.api_key),
                {
                    "taskType": "imageUpload",
                    "taskUUID": Uuid::new_v4().to_string(),
                    "image": request.photo_data_url,
                },
            ]))
            .await?;

        let image_uuid = upload.image_uuid();
        if image_uuid.is_none() {
            println!("⚠️  No upload handle returned, skipping face application");
        }

        // Step 3: submit the inference, chained with a face swap when we
        // have an upload handle
        progress.report(50, STAGE_GENERATING).await;
        let seed: u32 = rand::thread_rng().gen_range(0..1_000_000);

        let mut tasks = vec![
            auth_task(&request.api_key),
            json!({
                "taskType": "imageInference",
                "taskUUID": Uuid::new_v4().to_string(),
                "positivePrompt": request.prompt,
                "model": MODEL,
                "width": OUTPUT_SIZE,
                "height": OUTPUT_SIZE,
                "numberResults": 1,
                "outputFormat": "WEBP",
                "CFGScale": 7,
                "scheduler": "DPMSolverMultistepScheduler",
                "steps": 25,
                "seed": seed,
            }),
        ];
        if let Some(source_uuid) = &image_uuid {
            tasks.push(json!({
                "taskType": "faceSwap",
                "taskUUID": Uuid::new_v4().to_string(),
                "sourceImageUUID": source_uuid,
                "targetImageUUID": "generated",
                "strength": 0.8,
            }));
        }

        let result = self.post_tasks(Value::Array(tasks)).await?;

        // Step 4: extract the resulting image reference
        progress.report(80, STAGE_APPLYING_FACE).await;
        let image_url = result
            .image_url()
            .ok_or_else(|| GenerateError::Failed("No image was generated".to_string()))?;

        Ok(Vision::new(image_url.to_string(), request.goal.clone()))
    }
}

/// Response envelope for a task array submission
#[derive(Debug, Clone, Deserialize)]
pub struct TaskResponse {
    #[serde(default)]
    data: Vec<TaskResult>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    errors: Option<Value>,
    #[serde(default, rename = "errorMessage")]
    error_message: Option<String>,
}

/// One task result inside a response envelope
#[derive(Debug, Clone, Deserialize)]
struct TaskResult {
    #[serde(default, rename = "taskType")]
    task_type: String,
    #[serde(default, rename = "imageUUID")]
    image_uuid: Option<String>,
    #[serde(default, rename = "imageURL")]
    image_url: Option<String>,
}

impl TaskResponse {
    /// Reject envelopes that carry an error payload
    fn ensure_ok(&self) -> Result<(), GenerateError> {
        if self.error.is_some() || self.errors.is_some() {
            let reason = self
                .error_message
                .clone()
                .unwrap_or_else(|| "Failed to generate image".to_string());
            return Err(GenerateError::Failed(reason));
        }
        Ok(())
    }

    /// The upload handle, when an imageUpload task succeeded
    fn image_uuid(&self) -> Option<String> {
        self.data
            .iter()
            .find(|t| t.task_type == "imageUpload")
            .and_then(|t| t.image_uuid.clone())
    }

    /// The generated image reference, from either the inference or the
    /// face swap result
    fn image_url(&self) -> Option<&str> {
        self.data
            .iter()
            .find(|t| {
                (t.task_type == "imageInference" || t.task_type == "faceSwap")
                    && t.image_url.is_some()
            })
            .and_then(|t| t.image_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::futures::channel::mpsc;

    #[tokio::test]
    async fn test_unreachable_endpoint_surfaces_a_failure() {
        // Port 9 (discard) is not listening; the request fails fast
        let provider = RunwareProvider::with_url("http://127.0.0.1:9".to_string());
        let request = GenerationRequest {
            photo_data_url: "data:image/jpeg;base64,AAAA".to_string(),
            prompt: "a prompt".to_string(),
            goal: "Running my own bakery".to_string(),
            api_key: "rw-key".to_string(),
        };
        let (sender, _receiver) = mpsc::channel(16);
        let mut progress = ProgressReporter::new(sender);

        let result = provider.generate(&request, &mut progress).await;
        assert!(matches!(result, Err(GenerateError::Failed(_))));
    }

    #[test]
    fn test_success_envelope_yields_image_url() {
        let response: TaskResponse = serde_json::from_str(
            r#"{
                "data": [
                    {"taskType": "authentication"},
                    {"taskType": "imageInference", "imageURL": "https://im.runware.ai/x.webp"}
                ]
            }"#,
        )
        .unwrap();

        assert!(response.ensure_ok().is_ok());
        assert_eq!(response.image_url(), Some("https://im.runware.ai/x.webp"));
    }

    #[test]
    fn test_face_swap_result_is_accepted() {
        let response: TaskResponse = serde_json::from_str(
            r#"{
                "data": [
                    {"taskType": "imageInference"},
                    {"taskType": "faceSwap", "imageURL": "https://im.runware.ai/face.webp"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            response.image_url(),
            Some("https://im.runware.ai/face.webp")
        );
    }

    #[test]
    fn test_error_envelope_is_rejected_with_message() {
        let response: TaskResponse = serde_json::from_str(
            r#"{"errors": [{"code": "invalidApiKey"}], "errorMessage": "Invalid API key"}"#,
        )
        .unwrap();

        assert_eq!(
            response.ensure_ok(),
            Err(GenerateError::Failed("Invalid API key".to_string()))
        );
    }

    #[test]
    fn test_error_envelope_without_message_gets_default() {
        let response: TaskResponse = serde_json::from_str(r#"{"error": true}"#).unwrap();
        assert_eq!(
            response.ensure_ok(),
            Err(GenerateError::Failed("Failed to generate image".to_string()))
        );
    }

    #[test]
    fn test_envelope_without_image_url_yields_none() {
        let response: TaskResponse = serde_json::from_str(
            r#"{"data": [{"taskType": "imageInference"}]}"#,
        )
        .unwrap();
        assert!(response.ensure_ok().is_ok());
        assert!(response.image_url().is_none());
    }

    #[test]
    fn test_upload_handle_extraction() {
        let response: TaskResponse = serde_json::from_str(
            r#"{
                "data": [
                    {"taskType": "authentication"},
                    {"taskType": "imageUpload", "imageUUID": "abc-123"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(response.image_uuid(), Some("abc-123".to_string()));
    }
}
