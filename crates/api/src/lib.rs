//! # Bizkit API
//!
//! HTTP application layer - routes, request identity and entry point.
//!
//! This crate contains:
//! - axum routes for the business profile and health endpoints
//! - Application context (dependency injection)
//! - Logging setup and request outcome logging
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Translates domain errors into HTTP status codes and envelopes

pub mod auth;
pub mod context;
pub mod errors;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::AppContext;
pub use errors::ApiError;
pub use routes::build_router;
