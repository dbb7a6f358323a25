use serde::Serialize;

use gemini::models::text_generation::GroundingChunk;
use gemini::models::video_generation::VideoOperation;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamPayload {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub image_bytes: String,
}

#[derive(Debug, Serialize)]
pub struct OperationResponse {
    pub operation: VideoOperation,
}
