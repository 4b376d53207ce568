//! In-process storage for development and tests

pub mod profile_store;

pub use profile_store::InMemoryProfileStore;
