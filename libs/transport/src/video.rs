//! Video generation orchestration: start the long-running operation,
//! poll until it settles, and surface the download link.

use std::{future::Future, time::Duration};

use anyhow::anyhow;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use gemini::models::video_generation::VideoOperation;

use crate::Client;

/// Proxy-side half of the video flow. A trait so the polling loop can
/// be driven by a scripted provider in tests.
pub trait VideoApi {
    fn start_video_generation(
        &self,
        prompt: &str,
    ) -> impl Future<Output = anyhow::Result<VideoOperation>> + Send;

    fn check_video_status(
        &self,
        operation: &VideoOperation,
    ) -> impl Future<Output = anyhow::Result<VideoOperation>> + Send;
}

impl VideoApi for Client {
    async fn start_video_generation(
        &self,
        prompt: &str,
    ) -> anyhow::Result<VideoOperation> {
        let response = self
            .post_task("startVideoGeneration", &json!({ "prompt": prompt }))
            .await?;
        if !response.status().is_success() {
            return Err(anyhow!(Self::error_message(response).await));
        }

        let body = response.json::<OperationBody>().await?;

        Ok(body.operation)
    }

    async fn check_video_status(
        &self,
        operation: &VideoOperation,
    ) -> anyhow::Result<VideoOperation> {
        let response = self
            .post_task("checkVideoStatus", &json!({ "operation": operation }))
            .await?;
        if !response.status().is_success() {
            return Err(anyhow!(Self::error_message(response).await));
        }

        let body = response.json::<OperationBody>().await?;

        Ok(body.operation)
    }
}

#[derive(Debug, serde::Deserialize)]
struct OperationBody {
    operation: VideoOperation,
}

/// Pacing of the status polls. Defaults give the operation fifteen
/// minutes to settle before [`VideoError::TimedOut`].
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_checks: usize,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval: Duration::from_secs(10), max_checks: 90 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VideoError {
    #[error("Video generation timed out. Please try again.")]
    TimedOut,
    #[error("Video generation failed. Your prompt was blocked for: {0}. Please try a different prompt.")]
    Blocked(String),
    #[error("No video was generated by the API.")]
    Empty,
    #[error("Video generation was cancelled.")]
    Cancelled,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Run a video generation end to end and return the download link.
///
/// `on_status` receives human-readable progress lines as the loop moves
/// through its phases. The loop stops at the first settled operation,
/// after `config.max_checks` polls, or as soon as `cancel` fires.
pub async fn poll_video<A, F>(
    api: &A,
    prompt: &str,
    config: &PollConfig,
    cancel: &CancellationToken,
    mut on_status: F,
) -> Result<String, VideoError>
where
    A: VideoApi + Sync,
    F: FnMut(&str),
{
    on_status("Starting video generation...");
    let mut operation = api.start_video_generation(prompt).await?;
    on_status("Processing video... this can take a few minutes.");

    for _ in 0..config.max_checks {
        if cancel.is_cancelled() {
            return Err(VideoError::Cancelled);
        }
        if operation.is_done() {
            return finish(&operation, &mut on_status);
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(VideoError::Cancelled),
            _ = tokio::time::sleep(config.interval) => {}
        }

        on_status("Checking video status...");
        operation = api.check_video_status(&operation).await?;
    }

    if operation.is_done() {
        return finish(&operation, &mut on_status);
    }

    Err(VideoError::TimedOut)
}

fn finish(
    operation: &VideoOperation,
    on_status: &mut impl FnMut(&str),
) -> Result<String, VideoError> {
    if let Some(uri) = operation.download_uri() {
        on_status("Video generation complete!");
        return Ok(uri.to_string());
    }

    match operation.block_reason() {
        Some(reason) => Err(VideoError::Blocked(reason.to_string())),
        None => Err(VideoError::Empty),
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    /// Replays a fixed sequence of operation states.
    struct Scripted {
        states: Mutex<Vec<VideoOperation>>,
        checks: Mutex<usize>,
    }

    impl Scripted {
        fn new(states: Vec<serde_json::Value>) -> Self {
            let mut states: Vec<_> =
                states.into_iter().map(VideoOperation).collect();
            states.reverse();
            Self { states: Mutex::new(states), checks: Mutex::new(0) }
        }

        fn checks(&self) -> usize {
            *self.checks.lock().unwrap()
        }
    }

    impl VideoApi for Scripted {
        async fn start_video_generation(
            &self,
            _prompt: &str,
        ) -> anyhow::Result<VideoOperation> {
            Ok(self.states.lock().unwrap().pop().unwrap())
        }

        async fn check_video_status(
            &self,
            _operation: &VideoOperation,
        ) -> anyhow::Result<VideoOperation> {
            *self.checks.lock().unwrap() += 1;
            Ok(self.states.lock().unwrap().pop().unwrap())
        }
    }

    fn fast() -> PollConfig {
        PollConfig { interval: Duration::from_millis(1), max_checks: 5 }
    }

    fn pending() -> serde_json::Value {
        json!({ "name": "operations/abc", "done": false })
    }

    fn done_with_uri() -> serde_json::Value {
        json!({
            "name": "operations/abc",
            "done": true,
            "response": {
                "generateVideoResponse": {
                    "generatedSamples": [
                        { "video": { "uri": "https://videos.example/abc.mp4" } }
                    ]
                }
            }
        })
    }

    #[tokio::test]
    async fn polls_until_done_and_returns_the_uri() {
        let api =
            Scripted::new(vec![pending(), pending(), done_with_uri()]);
        let mut statuses = Vec::new();

        let uri = poll_video(
            &api,
            "a dancing robot",
            &fast(),
            &CancellationToken::new(),
            |s| statuses.push(s.to_string()),
        )
        .await
        .unwrap();

        assert_eq!(uri, "https://videos.example/abc.mp4");
        assert_eq!(api.checks(), 2);
        assert_eq!(statuses.first().unwrap(), "Starting video generation...");
        assert_eq!(statuses.last().unwrap(), "Video generation complete!");
        assert!(statuses
            .iter()
            .any(|s| s == "Checking video status..."));
    }

    #[tokio::test]
    async fn blocked_prompt_reports_the_reason() {
        let api = Scripted::new(vec![json!({
            "name": "operations/abc",
            "done": true,
            "response": {
                "promptFeedback": { "blockReason": "SAFETY" }
            }
        })]);

        let result = poll_video(
            &api,
            "a blocked prompt",
            &fast(),
            &CancellationToken::new(),
            |_| {},
        )
        .await;

        let message = result.unwrap_err().to_string();
        assert!(message.contains("SAFETY"), "{message}");
        assert!(message.contains("try a different prompt"), "{message}");
    }

    #[tokio::test]
    async fn done_without_a_video_is_an_empty_result() {
        let api = Scripted::new(vec![json!({
            "name": "operations/abc",
            "done": true,
            "response": {}
        })]);

        let result = poll_video(
            &api,
            "a vanishing act",
            &fast(),
            &CancellationToken::new(),
            |_| {},
        )
        .await;

        assert!(matches!(result, Err(VideoError::Empty)));
    }

    #[tokio::test]
    async fn never_settling_times_out_after_max_checks() {
        let api = Scripted::new(vec![pending(); 7]);

        let result = poll_video(
            &api,
            "an endless render",
            &fast(),
            &CancellationToken::new(),
            |_| {},
        )
        .await;

        assert!(matches!(result, Err(VideoError::TimedOut)));
        assert_eq!(api.checks(), 5);
    }

    #[tokio::test]
    async fn cancellation_stops_the_loop() {
        let api = Scripted::new(vec![pending(); 7]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = poll_video(
            &api,
            "an abandoned render",
            &fast(),
            &cancel,
            |_| {},
        )
        .await;

        assert!(matches!(result, Err(VideoError::Cancelled)));
        assert_eq!(api.checks(), 0);
    }
}
