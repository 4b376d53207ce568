//! Configuration loading
//!
//! Loads the application `Config` from environment variables or a JSON/TOML
//! file. See [`loader`] for the lookup order and variable names.

pub mod loader;

pub use loader::{env_var, load, load_from_env, load_from_file, load_or_default, probe_config_paths};
