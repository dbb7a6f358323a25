use anyhow::Context;
use async_stream::stream;
use futures_util::{stream::BoxStream, StreamExt};

use crate::models::Models;
use crate::sse::SseBuffer;

use super::{ContentChunk, GenerateContentRequest, TextGeneration};

impl TextGeneration for Models {
    async fn generate_content_stream(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> anyhow::Result<BoxStream<'static, anyhow::Result<ContentChunk>>>
    {
        let response = self.stream_response(model, &request).await?;

        let stream = stream! {
            let mut frames = SseBuffer::new();
            let mut body = response.bytes_stream();
            while let Some(next) = body.next().await {
                let bytes = match next {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        yield Err(anyhow::Error::new(e)
                            .context("failed to read provider stream"));
                        return;
                    }
                };
                for payload in frames.push(&bytes) {
                    match serde_json::from_str::<ContentChunk>(&payload)
                        .context("failed to parse provider chunk")
                    {
                        Ok(chunk) => yield Ok(chunk),
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }
            }
        };

        Ok(stream.boxed())
    }
}
