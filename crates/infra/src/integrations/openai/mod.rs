/// OpenAI integration for profile enhancement
///
/// This module provides an OpenAI API client that implements the core
/// `TextGenerator` port, so the profile enhancer can ask for structured
/// business insights.
///
/// # Architecture
///
/// - **Client**: `OpenAIClient` - HTTP client wrapper for OpenAI Chat Completions API
/// - **Types**: Request/response types and structured errors
///
/// # Usage
///
/// ```no_run
/// use bizkit_core::TextGenerator;
/// use bizkit_infra::http::HttpClient;
/// use bizkit_infra::integrations::openai::OpenAIClient;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let http_client = HttpClient::new()?;
///
/// let api_key = std::env::var("OPENAI_API_KEY")?;
/// let client = OpenAIClient::new(api_key, http_client);
///
/// let reply = client.generate("Describe a coffee shop as JSON").await?;
/// println!("{reply}");
/// # Ok(())
/// # }
/// ```
///
/// # API Integration
///
/// Uses OpenAI's Chat Completions API with:
/// - Model: `gpt-4o-mini` (configurable via `with_model()`)
/// - Temperature: 0.7
/// - Response format: JSON object
///
/// # Error Handling
///
/// Requests are sent once. Failures surface as `OpenAIError` and reach the
/// enhancer as `BizkitError::Enhancement`, which falls back to the template.
pub mod client;
pub mod types;

pub use client::OpenAIClient;
pub use types::OpenAIError;
