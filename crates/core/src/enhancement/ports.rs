//! Port interface for text generation

use async_trait::async_trait;
use bizkit_domain::Result;

/// External text-generation collaborator (OpenAI, Gemini, ...)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt and return the raw text reply
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider label for logs
    fn provider_name(&self) -> &'static str;
}
