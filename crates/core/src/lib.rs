//! # Bizkit Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for storage, text generation and
//!   identity
//! - The profile enhancer
//! - The profile service (validate, enhance, persist)
//!
//! ## Architecture Principles
//! - Only depends on `bizkit-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod enhancement;
pub mod identity;
pub mod profile;

// Re-export specific items to avoid ambiguity
pub use enhancement::ports::TextGenerator;
pub use enhancement::{EnhancementOutcome, EnhancementRequest, EnhancementSource, ProfileEnhancer};
pub use identity::ports::IdentityProvider;
pub use profile::ports::ProfileStore;
pub use profile::{ProfileService, ProfileWrite};
