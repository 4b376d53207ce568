//! Configuration management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ENHANCEMENT_TIMEOUT_SECS, MAX_ENHANCEMENT_TIMEOUT_SECS, MIN_ENHANCEMENT_TIMEOUT_SECS,
};
use crate::{BizkitError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub enhancer: EnhancerConfig,
    pub auth: AuthConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which ProfileStore backend to construct
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Mongodb,
    File,
    Memory,
}

crate::impl_domain_label_conversions!(StorageBackend {
    Sqlite => "sqlite",
    Mongodb => "mongodb",
    File => "file",
    Memory => "memory",
});

/// Storage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub sqlite: SqliteConfig,
    pub mongodb: MongoConfig,
    pub file: FileStoreConfig,
}

/// Relational backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    pub path: String,
    pub pool_size: u32,
}

/// Document backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    #[serde(skip_serializing)]
    pub uri: String,
    pub database: String,
    pub collection: String,
}

/// Flat-file backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    pub directory: PathBuf,
}

/// Text-generation collaborator used by the enhancer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextProvider {
    /// Never call out; every profile gets the templated enhancement.
    #[default]
    None,
    Openai,
    Gemini,
}

crate::impl_domain_label_conversions!(TextProvider {
    None => "none",
    Openai => "openai",
    Gemini => "gemini",
});

/// Enhancer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    pub provider: TextProvider,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Provider model override; each client has its own default.
    pub model: Option<String>,
    /// Base URL override, used for self-hosted gateways and tests.
    pub api_url: Option<String>,
    pub timeout_seconds: u64,
}

impl EnhancerConfig {
    /// Timeout clamped into the supported range.
    pub fn effective_timeout_seconds(&self) -> u64 {
        self.timeout_seconds.clamp(MIN_ENHANCEMENT_TIMEOUT_SECS, MAX_ENHANCEMENT_TIMEOUT_SECS)
    }
}

/// How callers are identified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Every request acts as `fixed_owner_id`. Development only.
    Fixed,
    #[default]
    Jwt,
}

crate::impl_domain_label_conversions!(AuthMode {
    Fixed => "fixed",
    Jwt => "jwt",
});

/// Authentication configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub fixed_owner_id: String,
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 5000 }
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self { path: "bizkit.db".to_string(), pool_size: 8 }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "bizkit".to_string(),
            collection: "businesses".to_string(),
        }
    }
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self { directory: PathBuf::from("data/businesses") }
    }
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            provider: TextProvider::None,
            api_key: None,
            model: None,
            api_url: None,
            timeout_seconds: DEFAULT_ENHANCEMENT_TIMEOUT_SECS,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { mode: AuthMode::Jwt, fixed_owner_id: "test-user-id".to_string(), jwt_secret: None }
    }
}

impl Config {
    /// Reject settings that cannot produce a working service.
    ///
    /// # Errors
    /// Returns `BizkitError::Config` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(BizkitError::Config("server.host must not be empty".into()));
        }

        match self.storage.backend {
            StorageBackend::Sqlite => {
                if self.storage.sqlite.path.trim().is_empty() {
                    return Err(BizkitError::Config("storage.sqlite.path must not be empty".into()));
                }
                if self.storage.sqlite.pool_size == 0 {
                    return Err(BizkitError::Config(
                        "storage.sqlite.pool_size must be at least 1".into(),
                    ));
                }
            }
            StorageBackend::Mongodb => {
                let mongo = &self.storage.mongodb;
                if mongo.uri.trim().is_empty()
                    || mongo.database.trim().is_empty()
                    || mongo.collection.trim().is_empty()
                {
                    return Err(BizkitError::Config(
                        "storage.mongodb requires uri, database and collection".into(),
                    ));
                }
            }
            StorageBackend::File => {
                if self.storage.file.directory.as_os_str().is_empty() {
                    return Err(BizkitError::Config(
                        "storage.file.directory must not be empty".into(),
                    ));
                }
            }
            StorageBackend::Memory => {}
        }

        if self.enhancer.timeout_seconds == 0 {
            return Err(BizkitError::Config("enhancer.timeout_seconds must be positive".into()));
        }
        if self.enhancer.provider != TextProvider::None
            && self.enhancer.api_key.as_deref().map_or(true, |k| k.trim().is_empty())
        {
            return Err(BizkitError::Config(format!(
                "enhancer.api_key is required for provider '{}'",
                self.enhancer.provider
            )));
        }

        match self.auth.mode {
            AuthMode::Fixed if self.auth.fixed_owner_id.trim().is_empty() => {
                Err(BizkitError::Config("auth.fixed_owner_id must not be empty".into()))
            }
            AuthMode::Jwt if self.auth.jwt_secret.as_deref().map_or(true, str::is_empty) => {
                Err(BizkitError::Config("auth.jwt_secret is required in jwt mode".into()))
            }
            _ => Ok(()),
        }
    }
}
