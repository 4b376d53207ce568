//! # Bizkit Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Profile store backends (SQLite, MongoDB, JSON files, in-memory)
//! - HTTP client and text-generation integrations (OpenAI, Gemini)
//! - Identity providers (fixed development owner, HS256 JWT)
//! - Configuration loading and adapter construction
//!
//! ## Architecture
//! - Implements traits defined in `bizkit-core`
//! - Depends on `bizkit-domain` and `bizkit-core`
//! - Contains all "impure" code (I/O, network, databases)

pub mod auth;
pub mod config;
pub mod database;
#[cfg(feature = "document-store")]
pub mod document;
pub mod errors;
pub mod factory;
pub mod file;
pub mod http;
pub mod integrations;
pub mod memory;

// Re-export commonly used items
pub use auth::{FixedIdentityProvider, JwtIdentityProvider};
pub use database::{DbManager, SqliteProfileStore};
#[cfg(feature = "document-store")]
pub use document::MongoProfileStore;
pub use errors::InfraError;
pub use factory::{build_identity_provider, build_profile_store, build_text_generator};
pub use file::JsonFileProfileStore;
pub use http::HttpClient;
pub use memory::InMemoryProfileStore;
