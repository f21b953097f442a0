//! Gemini image generation client.
//!
//! Sends the user's photo inline (base64) together with the tifo prompt to
//! `models/{model}:generateContent` and returns the first inline image part
//! of the first candidate.

use super::{tifo_prompt, GenerationError, ImageGenerator, SourceImage};
use crate::config::GeneratorConfig;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini-backed [`ImageGenerator`].
#[derive(Clone)]
pub struct GeminiGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    aspect_ratio: String,
}

impl std::fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("aspect_ratio", &self.aspect_ratio)
            .finish_non_exhaustive()
    }
}

impl GeminiGenerator {
    /// Build a client from configuration.
    ///
    /// No request timeout is set: a generation waits for the service.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Config` if the API key is empty or the HTTP
    /// client cannot be created.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        if config.api_key.trim().is_empty() {
            return Err(GenerationError::Config(
                "API key is not set; export API_KEY or set generator.api_key".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(concat!("tifomaster/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GenerationError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            aspect_ratio: config.aspect_ratio.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of the generateContent call.
    pub fn request_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.endpoint, API_VERSION, self.model
        )
    }
}

#[async_trait]
impl ImageGenerator for GeminiGenerator {
    async fn generate(
        &self,
        source: &SourceImage,
        team_name: &str,
    ) -> Result<Vec<u8>, GenerationError> {
        let request = build_request(source, team_name, &self.aspect_ratio);

        tracing::debug!(
            model = %self.model,
            mime_type = source.mime_type(),
            image_bytes = source.len(),
            "Sending generation request"
        );

        let response = self
            .client
            .post(self.request_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    GenerationError::Network(format!("Failed to connect: {}", e))
                } else {
                    GenerationError::Network(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(GenerationError::from_status(
                status.as_u16(),
                error_message(&body),
            ));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
        extract_image(&parsed)
    }
}

/// Request body for `generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

/// Response body for `generateContent`. Only the fields we read.
#[derive(Debug, Deserialize, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Build the request: inline photo first, then the prompt.
pub fn build_request(
    source: &SourceImage,
    team_name: &str,
    aspect_ratio: &str,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: source.mime_type().to_string(),
                        data: BASE64.encode(source.bytes()),
                    }),
                },
                Part {
                    text: Some(tifo_prompt(team_name)),
                    inline_data: None,
                },
            ],
        }],
        generation_config: GenerationConfig {
            image_config: ImageConfig {
                aspect_ratio: aspect_ratio.to_string(),
            },
        },
    }
}

/// Pull the first inline image out of the first candidate.
pub fn extract_image(response: &GenerateContentResponse) -> Result<Vec<u8>, GenerationError> {
    let inline = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|content| content.parts.iter().find_map(|p| p.inline_data.as_ref()))
        .ok_or(GenerationError::EmptyResult)?;

    let bytes = BASE64
        .decode(inline.data.as_bytes())
        .map_err(|e| GenerationError::InvalidResponse(format!("bad base64 image data: {}", e)))?;

    if bytes.is_empty() {
        return Err(GenerationError::EmptyResult);
    }
    Ok(bytes)
}

/// Best-effort message from an error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{}: {}", status, envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => body.trim().to_string(),
    }
}
