use anyhow::ensure;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, Response,
};
use serde::Serialize;

pub mod image_generation;
pub mod text_generation;
pub mod video_generation;

/// Client for the generative-language API. Sole holder of the provider
/// credential; the key travels in a default header, or as a query
/// parameter for file downloads.
#[derive(Debug, Clone)]
pub struct Models {
    base_url: String,
    api_key: String,
    client: Client,
}

impl Models {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("*/*"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).unwrap(),
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .unwrap();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }

    async fn model_response<R: Serialize>(
        &self,
        model: &str,
        verb: &str,
        request: &R,
    ) -> anyhow::Result<String> {
        let response = self
            .client
            .post(format!("{}/models/{}:{}", self.base_url, model, verb))
            .json(request)
            .send()
            .await?;

        let status_code = response.status();
        let text = response.text().await;

        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            text
        );

        Ok(text?)
    }

    async fn stream_response<R: Serialize>(
        &self,
        model: &str,
        request: &R,
    ) -> anyhow::Result<Response> {
        let response = self
            .client
            .post(format!(
                "{}/models/{}:streamGenerateContent?alt=sse",
                self.base_url, model
            ))
            .json(request)
            .send()
            .await?;

        let status_code = response.status();
        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            response.text().await
        );

        Ok(response)
    }

    async fn get_response(&self, path: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .send()
            .await?;

        let status_code = response.status();
        let text = response.text().await;

        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            text
        );

        Ok(text?)
    }

    /// Provider download links require the credential as a query
    /// parameter rather than a header.
    fn keyed_url(&self, download_uri: &str) -> String {
        let separator = if download_uri.contains('?') { '&' } else { '?' };
        format!("{}{}key={}", download_uri, separator, self.api_key)
    }
}
