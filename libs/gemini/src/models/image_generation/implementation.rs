use anyhow::Context;

use crate::models::Models;

use super::{GenerateImagesRequest, GenerateImagesResponse, ImageGeneration};

impl ImageGeneration for Models {
    async fn generate_images(
        &self,
        model: &str,
        request: GenerateImagesRequest,
    ) -> anyhow::Result<GenerateImagesResponse> {
        let text = self.model_response(model, "predict", &request).await?;

        serde_json::from_str(&text).context("failed to parse image response")
    }
}
