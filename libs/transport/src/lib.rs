//! Client for the generation proxy endpoint.
//!
//! Every call is one POST of `{task, params}`. The text path yields a
//! lazy stream of [`StreamChunk`]s; dropping the stream closes the
//! underlying connection, which is how an abandoned generation stops
//! consuming the proxy.

use anyhow::{anyhow, Context};
use async_stream::stream;
use bytes::Bytes;
use futures_core::Stream;
use futures_util::{stream::BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use gemini::models::image_generation::ImageAspectRatio;
use gemini::models::text_generation::GroundingChunk;
use gemini::sse::SseBuffer;
use prompt::GenerationRequest;

pub mod video;

/// Consecutive malformed frames tolerated before the stream is declared
/// broken. Isolated bad frames are logged and skipped.
pub static MAX_CONSECUTIVE_PARSE_FAILURES: usize = 8;

/// One increment of a streamed generation, as framed by the proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamChunk {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    client: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn post_task<P: Serialize>(
        &self,
        task: &str,
        params: &P,
    ) -> anyhow::Result<reqwest::Response> {
        self.client
            .post(format!("{}/api/generate", self.base_url))
            .json(&json!({ "task": task, "params": params }))
            .send()
            .await
            .context("failed to reach the generation service")
    }

    /// The structured `{error}` message when the body carries one,
    /// otherwise a generic transport message.
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("request failed with status {}", status),
        }
    }

    /// Start a streamed text generation. The future resolves once the
    /// proxy has answered; the stream then yields chunks in arrival
    /// order.
    pub async fn generate_stream(
        &self,
        params: &GenerationRequest,
    ) -> anyhow::Result<BoxStream<'static, anyhow::Result<StreamChunk>>> {
        let response = self.post_task("generateStream", params).await?;
        if !response.status().is_success() {
            return Err(anyhow!(Self::error_message(response).await));
        }

        let body = response
            .bytes_stream()
            .map(|next| next.map_err(anyhow::Error::new));

        Ok(decode_stream(body).boxed())
    }

    /// Generate one image; returns the base64 payload.
    pub async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: ImageAspectRatio,
    ) -> anyhow::Result<String> {
        let response = self
            .post_task(
                "generateImage",
                &json!({ "prompt": prompt, "aspectRatio": aspect_ratio }),
            )
            .await?;
        if !response.status().is_success() {
            return Err(anyhow!(Self::error_message(response).await));
        }

        let body = response
            .json::<ImageBody>()
            .await
            .context("failed to parse image response")?;

        body.image_bytes
            .ok_or_else(|| anyhow!("API did not return an image."))
    }

    /// Fetch generated video bytes through the proxy for local playback.
    /// Failures here are playback failures, distinct from generation
    /// errors.
    pub async fn fetch_video(
        &self,
        download_link: &str,
    ) -> anyhow::Result<Bytes> {
        let response = self
            .post_task("fetchVideo", &json!({ "downloadLink": download_link }))
            .await
            .context("failed to load video for playback")?;
        if !response.status().is_success() {
            return Err(anyhow!(Self::error_message(response).await)
                .context("failed to load video for playback"));
        }

        response
            .bytes()
            .await
            .context("failed to load video for playback")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageBody {
    #[serde(default)]
    image_bytes: Option<String>,
}

/// Decode an SSE-framed byte stream into [`StreamChunk`]s, preserving
/// arrival order. Malformed frames are logged and skipped; a run of
/// [`MAX_CONSECUTIVE_PARSE_FAILURES`] of them ends the stream with an
/// error.
pub fn decode_stream<S>(
    body: S,
) -> impl Stream<Item = anyhow::Result<StreamChunk>>
where
    S: Stream<Item = anyhow::Result<Bytes>>,
{
    stream! {
        let mut frames = SseBuffer::new();
        let mut consecutive_failures = 0usize;
        futures_util::pin_mut!(body);
        while let Some(next) = body.next().await {
            let bytes = match next {
                Ok(bytes) => bytes,
                Err(e) => {
                    yield Err(e.context("stream interrupted"));
                    return;
                }
            };
            for payload in frames.push(&bytes) {
                match serde_json::from_str::<StreamChunk>(&payload) {
                    Ok(chunk) => {
                        consecutive_failures = 0;
                        yield Ok(chunk);
                    }
                    Err(e) => {
                        consecutive_failures += 1;
                        error!(
                            task = "parse stream chunk",
                            error = e.to_string(),
                        );
                        if consecutive_failures
                            >= MAX_CONSECUTIVE_PARSE_FAILURES
                        {
                            yield Err(anyhow!(
                                "gave up after {} consecutive malformed stream chunks",
                                consecutive_failures
                            ));
                            return;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use futures_util::stream;

    use super::*;

    fn body(
        parts: Vec<&'static str>,
    ) -> impl Stream<Item = anyhow::Result<Bytes>> {
        stream::iter(
            parts.into_iter().map(|p| Ok(Bytes::from_static(p.as_bytes()))),
        )
    }

    #[tokio::test]
    async fn yields_every_chunk_in_order() {
        let frames = body(vec![
            "data: {\"text\":\"Dear \"}\n\n",
            "data: {\"text\":\"Alice,\"}\n\ndata: {\"text\":\" hello\"}\n\n",
        ]);

        let chunks: Vec<_> = decode_stream(frames).collect().await;

        let texts: Vec<_> =
            chunks.iter().map(|c| c.as_ref().unwrap().text.clone()).collect();
        assert_eq!(texts, vec!["Dear ", "Alice,", " hello"]);
        assert_eq!(texts.concat(), "Dear Alice, hello");
    }

    #[tokio::test]
    async fn reassembles_frames_split_across_reads() {
        let frames = body(vec![
            "data: {\"te",
            "xt\":\"one\"}\n",
            "\ndata: {\"text\":\"two\"}\n\n",
        ]);

        let chunks: Vec<_> = decode_stream(frames).collect().await;

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].as_ref().unwrap().text, "one");
        assert_eq!(chunks[1].as_ref().unwrap().text, "two");
    }

    #[tokio::test]
    async fn carries_grounding_chunks_through() {
        let frames = body(vec![
            "data: {\"text\":\"cited\",\"groundingChunks\":[{\"web\":{\"uri\":\"https://example.com\",\"title\":\"Example\"}}]}\n\n",
        ]);

        let chunks: Vec<_> = decode_stream(frames).collect().await;

        let grounding = chunks[0]
            .as_ref()
            .unwrap()
            .grounding_chunks
            .as_ref()
            .unwrap();
        assert_eq!(grounding[0].web.as_ref().unwrap().uri, "https://example.com");
    }

    #[tokio::test]
    async fn skips_isolated_malformed_frames() {
        let frames = body(vec![
            "data: {\"text\":\"good\"}\n\ndata: not json\n\ndata: {\"text\":\"also good\"}\n\n",
        ]);

        let chunks: Vec<_> = decode_stream(frames).collect().await;

        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.is_ok()));
    }

    #[tokio::test]
    async fn escalates_after_a_run_of_malformed_frames() {
        let garbage = "data: not json\n\n".repeat(MAX_CONSECUTIVE_PARSE_FAILURES);
        let frames = stream::iter(vec![Ok(Bytes::from(garbage))]);

        let chunks: Vec<_> = decode_stream(frames).collect().await;

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_err());
    }
}
