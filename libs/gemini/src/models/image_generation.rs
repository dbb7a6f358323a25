pub mod implementation;

use serde::{Deserialize, Serialize};

pub static IMAGEN_3: &str = "imagen-3.0-generate-002";

pub trait ImageGeneration {
    fn generate_images(
        &self,
        model: &str,
        request: GenerateImagesRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<GenerateImagesResponse>>
           + Send;
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateImagesRequest {
    pub instances: Vec<ImageInstance>,
    pub parameters: ImageParameters,
}

impl GenerateImagesRequest {
    /// Exactly one JPEG image at the requested aspect ratio.
    pub fn single_jpeg(prompt: &str, aspect_ratio: ImageAspectRatio) -> Self {
        Self {
            instances: vec![ImageInstance { prompt: prompt.to_string() }],
            parameters: ImageParameters {
                sample_count: 1,
                aspect_ratio,
                output_mime_type: "image/jpeg".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageInstance {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageParameters {
    pub sample_count: i32,
    pub aspect_ratio: ImageAspectRatio,
    pub output_mime_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageAspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "4:3")]
    Portrait,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateImagesResponse {
    #[serde(default)]
    pub predictions: Vec<ImagePrediction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePrediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn request_asks_for_exactly_one_jpeg() {
        let request =
            GenerateImagesRequest::single_jpeg("a dj", ImageAspectRatio::Landscape);

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["instances"][0]["prompt"], "a dj");
        assert_eq!(json["parameters"]["sampleCount"], 1);
        assert_eq!(json["parameters"]["aspectRatio"], "16:9");
        assert_eq!(json["parameters"]["outputMimeType"], "image/jpeg");
    }
}
