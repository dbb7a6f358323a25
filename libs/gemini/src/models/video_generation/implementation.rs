use anyhow::{bail, Context};

use crate::models::Models;

use super::{GenerateVideosRequest, VideoGeneration, VideoOperation};

impl VideoGeneration for Models {
    async fn start_video_generation(
        &self,
        model: &str,
        request: GenerateVideosRequest,
    ) -> anyhow::Result<VideoOperation> {
        let text = self
            .model_response(model, "predictLongRunning", &request)
            .await?;

        serde_json::from_str(&text)
            .context("failed to parse video operation")
    }

    async fn get_video_operation(
        &self,
        operation: &VideoOperation,
    ) -> anyhow::Result<VideoOperation> {
        let Some(name) = operation.name() else {
            bail!("video operation handle has no name");
        };

        let text = self.get_response(name).await?;

        serde_json::from_str(&text)
            .context("failed to parse video operation")
    }

    async fn fetch_video(
        &self,
        download_uri: &str,
    ) -> anyhow::Result<reqwest::Response> {
        let response = self
            .client
            .get(self.keyed_url(download_uri))
            .send()
            .await
            .context("failed to fetch video from the provider")?;

        Ok(response)
    }
}
