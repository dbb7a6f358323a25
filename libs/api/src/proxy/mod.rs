use std::convert::Infallible;

use async_stream::stream;
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{sse::Event, IntoResponse, Response, Sse},
    Json,
};
use futures_util::StreamExt;
use serde_json::Value;
use tracing::error;

use gemini::models::image_generation::{
    GenerateImagesRequest, GenerateImagesResponse, ImageGeneration,
};
use gemini::models::text_generation::{GenerateContentRequest, TextGeneration};
use gemini::models::video_generation::{GenerateVideosRequest, VideoGeneration};
use prompt::{build_prompt, wants_web_grounding, GenerationRequest};

pub mod request;
pub mod response;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::{ApiError, ApiState};

use self::request::{
    CheckVideoParams, FetchVideoParams, GenerateImageParams, TaskRequest,
    VideoPromptParams,
};
use self::response::{ImageResponse, OperationResponse, StreamPayload};

/// Run a generation task
#[utoipa::path(
    post,
    path = "/api/generate",
    responses(
        (status = 200, description = "Run the requested generation task"),
        (status = 400, description = "Unknown task or invalid parameters"),
        (status = 405, description = "Only POST is accepted"),
    )
)]
pub async fn generate(
    State(state): State<ApiState>,
    body: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResponse<Response> {
    // A body that fails extraction still gets the `{error}` shape.
    let Json(body) =
        body.map_err(|e| ApiError::ClientError(e.body_text()))?;

    match body.task.as_str() {
        "generateStream" => generate_stream(state, body.params).await,
        "generateImage" => generate_image(state, body.params).await,
        "startVideoGeneration" => {
            start_video_generation(state, body.params).await
        }
        "checkVideoStatus" => check_video_status(state, body.params).await,
        "fetchVideo" => fetch_video(state, body.params).await,
        _ => Err(ApiError::ClientError("Invalid task specified.".to_string())),
    }
}

fn params<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::ClientError(format!("invalid parameters: {}", e)))
}

async fn generate_stream(
    state: ApiState,
    value: Value,
) -> ApiResponse<Response> {
    let request: GenerationRequest = params(value)?;
    let prompt = build_prompt(&request);
    let grounded = wants_web_grounding(&request);

    let mut upstream = state
        .gemini
        .generate_content_stream(
            &state.config.gemini.text_model,
            GenerateContentRequest::from_prompt(&prompt, grounded),
        )
        .await
        .server_error("start content stream")?;

    // Frame every provider chunk as one SSE event; a broken upstream
    // closes the stream after what was already relayed.
    let events = stream! {
        while let Some(next) = upstream.next().await {
            let chunk = match next {
                Ok(chunk) => chunk,
                Err(e) => {
                    error!(
                        task = "relay content stream",
                        error = format!("{:#}", e),
                    );
                    return;
                }
            };
            let payload = StreamPayload {
                text: chunk.text(),
                grounding_chunks: chunk.grounding_chunks(),
            };
            match Event::default().json_data(&payload) {
                Ok(event) => yield Ok::<Event, Infallible>(event),
                Err(e) => {
                    error!(
                        task = "encode stream event",
                        error = e.to_string(),
                    );
                    return;
                }
            }
        }
    };

    Ok(Sse::new(events).into_response())
}

async fn generate_image(
    state: ApiState,
    value: Value,
) -> ApiResponse<Response> {
    let image_params: GenerateImageParams = params(value)?;

    let response = state
        .gemini
        .generate_images(
            &state.config.gemini.image_model,
            GenerateImagesRequest::single_jpeg(
                &image_params.prompt,
                image_params.aspect_ratio,
            ),
        )
        .await
        .server_error("generate image")?;

    let image_bytes = first_image_bytes(response)?;

    Ok(Json(ImageResponse { image_bytes }).into_response())
}

/// The base64 payload of the first prediction. An empty prediction list
/// is how the provider reports a safety refusal.
fn first_image_bytes(
    response: GenerateImagesResponse,
) -> Result<String, ApiError> {
    let Some(prediction) = response.predictions.into_iter().next() else {
        return Err(ApiError::ServerError(
            "Image generation failed. Your prompt may have violated the safety policy. Please try a different prompt.".to_string(),
        ));
    };

    prediction
        .bytes_base64_encoded
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| {
            ApiError::ServerError(
                "No image was generated by the API.".to_string(),
            )
        })
}

async fn start_video_generation(
    state: ApiState,
    value: Value,
) -> ApiResponse<Response> {
    let video_params: VideoPromptParams = params(value)?;

    let operation = state
        .gemini
        .start_video_generation(
            &state.config.gemini.video_model,
            GenerateVideosRequest::single(&video_params.prompt),
        )
        .await
        .server_error("start video generation")?;

    Ok(Json(OperationResponse { operation }).into_response())
}

async fn check_video_status(
    state: ApiState,
    value: Value,
) -> ApiResponse<Response> {
    let check_params: CheckVideoParams = params(value)?;

    let operation = state
        .gemini
        .get_video_operation(&check_params.operation)
        .await
        .server_error("check video status")?;

    Ok(Json(OperationResponse { operation }).into_response())
}

async fn fetch_video(state: ApiState, value: Value) -> ApiResponse<Response> {
    let fetch_params: FetchVideoParams = params(value)?;
    let Some(download_link) = fetch_params
        .download_link
        .filter(|link| !link.is_empty())
    else {
        return Err(ApiError::ClientError(
            "Missing downloadLink parameter.".to_string(),
        ));
    };

    let upstream = state
        .gemini
        .fetch_video(&download_link)
        .await
        .server_error("fetch video")?;

    // Mirror the provider's verdict and framing, then relay the bytes
    // without buffering the whole file.
    let status = upstream.status();
    if !status.is_success() {
        error!(task = "fetch video", status = status.as_u16());
        return Ok((
            status,
            Json(serde_json::json!({
                "error": "Failed to fetch video from the provider."
            })),
        )
            .into_response());
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| header::HeaderValue::from_static("video/mp4"));
    let content_length =
        upstream.headers().get(header::CONTENT_LENGTH).cloned();

    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type);
    if let Some(value) = content_length {
        builder = builder.header(header::CONTENT_LENGTH, value);
    }

    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| ApiError::ServerError(e.to_string()))
}

#[cfg(test)]
mod test {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use gemini::models::image_generation::GenerateImagesResponse;
    use gemini::models::Models;
    use profile::ProfileStore;

    use crate::{router, ApiState, Config, GeminiConfig};

    use super::first_image_bytes;

    fn state() -> (tempfile::TempDir, ApiState) {
        let dir = tempfile::tempdir().unwrap();
        let state = ApiState {
            gemini: Models::new("http://localhost:9", "test-key"),
            profiles: ProfileStore::new(dir.path()),
            config: Config {
                gemini: GeminiConfig {
                    base_url: "http://localhost:9".to_string(),
                    text_model: "text-model".to_string(),
                    image_model: "image-model".to_string(),
                    video_model: "video-model".to_string(),
                },
            },
        };
        (dir, state)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn unknown_task_gets_the_exact_error_body() {
        let (_dir, state) = state();
        let app = router(state);

        let response = app
            .oneshot(post_json(
                "/api/generate",
                r#"{"task":"mineBitcoin","params":{}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"Invalid task specified."}"#);
    }

    #[tokio::test]
    async fn malformed_body_still_gets_the_error_shape() {
        let (_dir, state) = state();
        let app = router(state);

        let response = app
            .oneshot(post_json("/api/generate", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(body["error"].is_string(), "{body}");
    }

    #[tokio::test]
    async fn generate_only_accepts_post() {
        let (_dir, state) = state();
        let app = router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/generate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn fetch_video_requires_a_download_link() {
        let (_dir, state) = state();
        let app = router(state);

        let response = app
            .oneshot(post_json(
                "/api/generate",
                r#"{"task":"fetchVideo","params":{}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            &body[..],
            br#"{"error":"Missing downloadLink parameter."}"#
        );
    }

    #[test]
    fn first_image_bytes_unwraps_the_first_prediction() {
        let response = serde_json::from_str::<GenerateImagesResponse>(
            r#"{"predictions":[{"bytesBase64Encoded":"aGk=","mimeType":"image/jpeg"}]}"#,
        )
        .unwrap();

        assert_eq!(first_image_bytes(response).unwrap(), "aGk=");
    }

    #[test]
    fn empty_predictions_read_as_a_safety_refusal() {
        let response = serde_json::from_str::<GenerateImagesResponse>(
            r#"{"predictions":[]}"#,
        )
        .unwrap();

        let Err(crate::ApiError::ServerError(message)) =
            first_image_bytes(response)
        else {
            panic!("expected a server error");
        };
        assert!(message.contains("safety policy"), "{message}");
    }

    #[test]
    fn prediction_without_bytes_is_an_empty_result() {
        let response = serde_json::from_str::<GenerateImagesResponse>(
            r#"{"predictions":[{"mimeType":"image/jpeg"}]}"#,
        )
        .unwrap();

        let Err(crate::ApiError::ServerError(message)) =
            first_image_bytes(response)
        else {
            panic!("expected a server error");
        };
        assert_eq!(message, "No image was generated by the API.");
    }
}
