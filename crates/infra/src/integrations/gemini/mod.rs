//! Google Gemini integration for profile enhancement
//!
//! `GeminiClient` calls the `generateContent` endpoint of the Generative
//! Language API and implements the core `TextGenerator` port. The reply is
//! requested as `application/json` so the enhancer can parse it strictly.

pub mod client;
pub mod types;

pub use client::GeminiClient;
pub use types::GeminiError;
