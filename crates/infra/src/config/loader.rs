//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If `BIZKIT_STORAGE_BACKEND` is set, configuration comes from the
//!    environment (unset variables keep their defaults)
//! 2. Otherwise a config file is probed and parsed (JSON or TOML)
//! 3. Secrets (`BIZKIT_ENHANCER_API_KEY`, `BIZKIT_JWT_SECRET`,
//!    `BIZKIT_MONGODB_URI`) always override file values
//!
//! ## Environment Variables
//! - `BIZKIT_HOST`, `BIZKIT_PORT`: HTTP listener
//! - `BIZKIT_STORAGE_BACKEND`: `sqlite`, `mongodb`, `file` or `memory`
//! - `BIZKIT_SQLITE_PATH`, `BIZKIT_SQLITE_POOL_SIZE`
//! - `BIZKIT_MONGODB_URI`, `BIZKIT_MONGODB_DATABASE`, `BIZKIT_MONGODB_COLLECTION`
//! - `BIZKIT_DATA_DIR`: flat-file store directory
//! - `BIZKIT_ENHANCER_PROVIDER`: `none`, `openai` or `gemini`
//! - `BIZKIT_ENHANCER_API_KEY`, `BIZKIT_ENHANCER_MODEL`, `BIZKIT_ENHANCER_API_URL`
//! - `BIZKIT_ENHANCER_TIMEOUT_SECONDS`
//! - `BIZKIT_AUTH_MODE`: `jwt` or `fixed`
//! - `BIZKIT_FIXED_OWNER_ID`, `BIZKIT_JWT_SECRET`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}` then `./bizkit.{json,toml}`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names relative to the executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use bizkit_domain::{BizkitError, Config, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "bizkit.json", "bizkit.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `BizkitError::Config` if neither the environment nor a config
/// file yields a parseable configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!(backend = %config.storage.backend, "Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            let mut config = load_from_file(None)?;
            apply_secret_overrides(&mut config);
            Ok(config)
        }
    }
}

/// Like [`load`], but falls back to [`Config::default`] with a warning.
pub fn load_or_default() -> Config {
    load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "No usable configuration found, using defaults");
        let mut config = Config::default();
        apply_secret_overrides(&mut config);
        config
    })
}

/// Load configuration from environment variables
///
/// `BIZKIT_STORAGE_BACKEND` is required; everything else is optional and
/// falls back to the defaults.
///
/// # Errors
/// Returns `BizkitError::Config` if the backend variable is missing or any
/// variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    config.storage.backend = parse_value("BIZKIT_STORAGE_BACKEND", &env_var("BIZKIT_STORAGE_BACKEND")?)?;

    if let Some(host) = optional_env("BIZKIT_HOST") {
        config.server.host = host;
    }
    if let Some(port) = parsed_env("BIZKIT_PORT")? {
        config.server.port = port;
    }

    if let Some(path) = optional_env("BIZKIT_SQLITE_PATH") {
        config.storage.sqlite.path = path;
    }
    if let Some(pool_size) = parsed_env("BIZKIT_SQLITE_POOL_SIZE")? {
        config.storage.sqlite.pool_size = pool_size;
    }
    if let Some(database) = optional_env("BIZKIT_MONGODB_DATABASE") {
        config.storage.mongodb.database = database;
    }
    if let Some(collection) = optional_env("BIZKIT_MONGODB_COLLECTION") {
        config.storage.mongodb.collection = collection;
    }
    if let Some(directory) = optional_env("BIZKIT_DATA_DIR") {
        config.storage.file.directory = PathBuf::from(directory);
    }

    if let Some(provider) = parsed_env("BIZKIT_ENHANCER_PROVIDER")? {
        config.enhancer.provider = provider;
    }
    config.enhancer.model = optional_env("BIZKIT_ENHANCER_MODEL");
    config.enhancer.api_url = optional_env("BIZKIT_ENHANCER_API_URL");
    if let Some(timeout) = parsed_env("BIZKIT_ENHANCER_TIMEOUT_SECONDS")? {
        config.enhancer.timeout_seconds = timeout;
    }

    if let Some(mode) = parsed_env("BIZKIT_AUTH_MODE")? {
        config.auth.mode = mode;
    }
    if let Some(owner_id) = optional_env("BIZKIT_FIXED_OWNER_ID") {
        config.auth.fixed_owner_id = owner_id;
    }

    apply_secret_overrides(&mut config);
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations (see module docs).
///
/// # Errors
/// Returns `BizkitError::Config` if the file is missing, unreadable or
/// cannot be parsed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BizkitError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BizkitError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BizkitError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration, detecting the format from the file extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BizkitError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BizkitError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(BizkitError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    candidate_paths(&roots).into_iter().find(|path| path.exists())
}

fn candidate_paths(roots: &[PathBuf]) -> Vec<PathBuf> {
    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .collect()
}

/// Secrets never live in committed files; the environment wins.
fn apply_secret_overrides(config: &mut Config) {
    if let Some(uri) = optional_env("BIZKIT_MONGODB_URI") {
        config.storage.mongodb.uri = uri;
    }
    if let Some(api_key) = optional_env("BIZKIT_ENHANCER_API_KEY") {
        config.enhancer.api_key = Some(api_key);
    }
    if let Some(secret) = optional_env("BIZKIT_JWT_SECRET") {
        config.auth.jwt_secret = Some(secret);
    }
}

/// Get required environment variable
///
/// # Errors
/// Returns `BizkitError::Config` if the variable is not set.
pub fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| BizkitError::Config(format!("Missing required environment variable: {}", key)))
}

/// Non-empty value of `key`, if set.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parsed_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key).map(|raw| parse_value(key, &raw)).transpose()
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| BizkitError::Config(format!("Invalid value for {}: {}", key, e)))
}
