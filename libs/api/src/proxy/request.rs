use serde::Deserialize;
use serde_json::Value;

use gemini::models::image_generation::ImageAspectRatio;
use gemini::models::video_generation::VideoOperation;

/// Envelope of every proxy call. The task is matched as a plain string
/// so an unknown one can be answered with the documented 400 body.
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub task: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageParams {
    pub prompt: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: ImageAspectRatio,
}

fn default_aspect_ratio() -> ImageAspectRatio {
    ImageAspectRatio::Square
}

#[derive(Debug, Deserialize)]
pub struct VideoPromptParams {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckVideoParams {
    pub operation: VideoOperation,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchVideoParams {
    #[serde(default)]
    pub download_link: Option<String>,
}
