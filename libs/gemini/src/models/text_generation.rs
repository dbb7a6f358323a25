pub mod implementation;

use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};

pub static GEMINI_2_5_FLASH: &str = "gemini-2.5-flash";

pub trait TextGeneration {
    /// Start a streamed generation. The result resolves once the
    /// provider has accepted the request, so callers can still answer
    /// with a structured error before any bytes flow; the inner stream
    /// then yields chunks in provider order.
    fn generate_content_stream(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> impl std::future::Future<
        Output = anyhow::Result<
            BoxStream<'static, anyhow::Result<ContentChunk>>,
        >,
    > + Send;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str, grounded: bool) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt.to_string() }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(0.7),
                top_p: Some(0.95),
            }),
            tools: grounded.then(|| {
                vec![Tool { google_search: Some(GoogleSearch {}) }]
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    #[serde(rename = "googleSearch", skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentChunk {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl ContentChunk {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> String {
        let Some(candidate) = self.candidates.first() else {
            return String::new();
        };
        let Some(content) = &candidate.content else {
            return String::new();
        };
        content.parts.iter().map(|p| p.text.as_str()).collect()
    }

    /// Web citations attached to the first candidate, if any.
    pub fn grounding_chunks(&self) -> Option<Vec<GroundingChunk>> {
        let candidate = self.candidates.first()?;
        let metadata = candidate.grounding_metadata.as_ref()?;
        if metadata.grounding_chunks.is_empty() {
            return None;
        }
        Some(metadata.grounding_chunks.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn grounded_requests_carry_the_search_tool() {
        let grounded = GenerateContentRequest::from_prompt("p", true);
        let plain = GenerateContentRequest::from_prompt("p", false);

        let grounded = serde_json::to_value(&grounded).unwrap();
        let plain = serde_json::to_value(&plain).unwrap();

        assert!(grounded["tools"][0]["googleSearch"].is_object());
        assert!(plain.get("tools").is_none());
        assert_eq!(plain["generationConfig"]["temperature"], 0.7);
        assert_eq!(plain["generationConfig"]["topP"], 0.95);
    }

    #[test]
    fn chunk_text_concatenates_parts() {
        let chunk = serde_json::from_str::<ContentChunk>(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hel"},{"text":"lo"}]}}]}"#,
        )
        .unwrap();

        assert_eq!(chunk.text(), "Hello");
        assert!(chunk.grounding_chunks().is_none());
    }

    #[test]
    fn chunk_surfaces_grounding_citations() {
        let chunk = serde_json::from_str::<ContentChunk>(
            r#"{"candidates":[{
                "content":{"parts":[{"text":"cited"}]},
                "groundingMetadata":{"groundingChunks":[
                    {"web":{"uri":"https://example.com","title":"Example"}}
                ]}
            }]}"#,
        )
        .unwrap();

        let chunks = chunk.grounding_chunks().unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].web.as_ref().unwrap().title, "Example");
    }
}
