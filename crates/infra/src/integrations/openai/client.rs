/// OpenAI API client for profile enhancement
use async_trait::async_trait;
use bizkit_core::TextGenerator;
use bizkit_domain::{BizkitError, Result as DomainResult};
use reqwest::Method;
use tracing::debug;

use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OpenAIError, ResponseFormat,
};
use crate::http::HttpClient;

const OPENAI_API_BASE: &str = "https://api.openai.com";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const SYSTEM_PROMPT: &str = "You are a small-business marketing consultant. \
    Answer with a single JSON object and nothing else.";

/// OpenAI API client implementing [`TextGenerator`]
pub struct OpenAIClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    api_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key (required)
    /// * `http_client` - HTTP client carrying the request timeout
    pub fn new(api_key: String, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_url: format!("{OPENAI_API_BASE}{CHAT_COMPLETIONS_PATH}"),
        }
    }

    /// Use a different chat model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at another OpenAI-compatible base URL
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.api_url = format!("{}{CHAT_COMPLETIONS_PATH}", base_url.trim_end_matches('/'));
        self
    }

    /// Send one chat completion and return the assistant's message text
    ///
    /// # Errors
    /// Returns `OpenAIError` for network failures, API errors, or a reply
    /// without content.
    pub async fn complete(&self, prompt: &str) -> Result<String, OpenAIError> {
        let request_payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: SYSTEM_PROMPT.to_string() },
                ChatMessage { role: "user".to_string(), content: prompt.to_string() },
            ],
            temperature: DEFAULT_TEMPERATURE,
            response_format: ResponseFormat { format_type: "json_object".to_string() },
        };

        let request_builder = self
            .http_client
            .request(Method::POST, &self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_payload);

        let response = self.http_client.send(request_builder).await.map_err(|err| match err {
            BizkitError::Network(msg) => OpenAIError::Network(msg),
            other => OpenAIError::Network(format!("HTTP error: {other}")),
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), model = %self.model, "Received OpenAI API response");

        if !status.is_success() {
            return Err(Self::handle_error_status(status.as_u16(), response).await);
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| OpenAIError::InvalidSchema(format!("Failed to parse response: {e}")))?;

        if let Some(usage) = &chat_response.usage {
            debug!(tokens = usage.total_tokens, "OpenAI token usage");
        }

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| OpenAIError::InvalidSchema("Response contained no content".to_string()))
    }

    /// Handle HTTP error status codes
    async fn handle_error_status(status: u16, response: reqwest::Response) -> OpenAIError {
        let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            401 | 403 => OpenAIError::Authentication(format!("Invalid API key ({status})")),
            429 => OpenAIError::RateLimit,
            _ => OpenAIError::Api { status, message },
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAIClient {
    async fn generate(&self, prompt: &str) -> DomainResult<String> {
        Ok(self.complete(prompt).await?)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
