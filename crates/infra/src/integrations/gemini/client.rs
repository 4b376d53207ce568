//! Gemini API client

use async_trait::async_trait;
use bizkit_core::TextGenerator;
use bizkit_domain::{BizkitError, Result as DomainResult};
use reqwest::Method;
use tracing::debug;

use super::types::{
    Content, GeminiError, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::http::HttpClient;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Gemini API client implementing [`TextGenerator`]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Generate content for a single text prompt
    ///
    /// # Errors
    /// Returns `GeminiError` for network failures, API errors, blocked
    /// content or a reply without text.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GeminiError> {
        let payload = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: Some(prompt.to_string()) }] }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                temperature: DEFAULT_TEMPERATURE,
            },
        };

        let request_builder = self
            .http_client
            .request(Method::POST, self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload);

        let response = self.http_client.send(request_builder).await.map_err(|err| match err {
            BizkitError::Network(msg) => GeminiError::Network(msg),
            other => GeminiError::Network(format!("HTTP error: {other}")),
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), model = %self.model, "Received Gemini API response");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                401 | 403 => GeminiError::Authentication(format!("Invalid API key ({status})")),
                429 => GeminiError::RateLimit,
                code => GeminiError::Api { status: code, message },
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::InvalidSchema(format!("Failed to parse response: {e}")))?;

        body.into_text()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> DomainResult<String> {
        Ok(self.generate_content(prompt).await?)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
