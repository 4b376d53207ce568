//! Flat JSON file storage

pub mod profile_store;

pub use profile_store::JsonFileProfileStore;
