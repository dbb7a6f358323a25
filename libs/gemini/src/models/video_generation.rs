pub mod implementation;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub static VEO_2: &str = "veo-2.0-generate-001";

pub trait VideoGeneration {
    /// Kick off a long-running video job and return its raw operation
    /// handle. Polling is the caller's business.
    fn start_video_generation(
        &self,
        model: &str,
        request: GenerateVideosRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<VideoOperation>> + Send;

    /// Ask the provider for the current state of an operation.
    fn get_video_operation(
        &self,
        operation: &VideoOperation,
    ) -> impl std::future::Future<Output = anyhow::Result<VideoOperation>> + Send;

    /// Re-fetch a provider download URI with the credential attached.
    /// The response is returned as-is so callers can mirror the
    /// provider's status and headers.
    fn fetch_video(
        &self,
        download_uri: &str,
    ) -> impl std::future::Future<Output = anyhow::Result<reqwest::Response>> + Send;
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateVideosRequest {
    pub instances: Vec<VideoInstance>,
    pub parameters: VideoParameters,
}

impl GenerateVideosRequest {
    pub fn single(prompt: &str) -> Self {
        Self {
            instances: vec![VideoInstance { prompt: prompt.to_string() }],
            parameters: VideoParameters { sample_count: 1 },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoInstance {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    pub sample_count: i32,
}

/// Opaque provider operation handle. The shape is provider-owned and
/// passed through verbatim; accessors probe the fields the polling loop
/// needs without committing to a schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoOperation(pub Value);

impl VideoOperation {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn is_done(&self) -> bool {
        self.0.get("done").and_then(Value::as_bool).unwrap_or(false)
    }

    /// Download URI of the first generated video, probing both the
    /// SDK-style and REST-style result layouts.
    pub fn download_uri(&self) -> Option<String> {
        let response = self.0.get("response")?;
        response
            .pointer("/generatedVideos/0/video/uri")
            .or_else(|| {
                response.pointer(
                    "/generateVideoResponse/generatedSamples/0/video/uri",
                )
            })
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Why the provider produced no video, when it says so.
    pub fn block_reason(&self) -> Option<String> {
        self.0
            .pointer("/response/promptFeedback/blockReason")
            .or_else(|| self.0.pointer("/error/message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn pending_operation_is_not_done() {
        let operation = VideoOperation(json!({
            "name": "models/veo-2.0-generate-001/operations/abc"
        }));

        assert!(!operation.is_done());
        assert_eq!(
            operation.name(),
            Some("models/veo-2.0-generate-001/operations/abc")
        );
        assert_eq!(operation.download_uri(), None);
    }

    #[test]
    fn finds_download_uri_in_sdk_layout() {
        let operation = VideoOperation(json!({
            "done": true,
            "response": {
                "generatedVideos": [{"video": {"uri": "https://dl/v.mp4"}}]
            }
        }));

        assert!(operation.is_done());
        assert_eq!(operation.download_uri().as_deref(), Some("https://dl/v.mp4"));
    }

    #[test]
    fn finds_download_uri_in_rest_layout() {
        let operation = VideoOperation(json!({
            "done": true,
            "response": {
                "generateVideoResponse": {
                    "generatedSamples": [{"video": {"uri": "https://dl/v2.mp4"}}]
                }
            }
        }));

        assert_eq!(operation.download_uri().as_deref(), Some("https://dl/v2.mp4"));
    }

    #[test]
    fn surfaces_the_block_reason() {
        let operation = VideoOperation(json!({
            "done": true,
            "response": {"promptFeedback": {"blockReason": "SAFETY"}}
        }));

        assert_eq!(operation.download_uri(), None);
        assert_eq!(operation.block_reason().as_deref(), Some("SAFETY"));
    }
}
