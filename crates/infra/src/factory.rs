//! Adapter construction from configuration
//!
//! The API layer calls these once at startup and injects the results into
//! the core services.

use std::sync::Arc;
use std::time::Duration;

use bizkit_core::{IdentityProvider, ProfileStore, TextGenerator};
use bizkit_domain::{
    AuthConfig, AuthMode, BizkitError, EnhancerConfig, Result, StorageBackend, StorageConfig,
    TextProvider,
};
use tracing::info;

use crate::auth::{FixedIdentityProvider, JwtIdentityProvider};
use crate::database::{DbManager, SqliteProfileStore};
use crate::file::JsonFileProfileStore;
use crate::http::HttpClient;
use crate::integrations::gemini::GeminiClient;
use crate::integrations::openai::OpenAIClient;
use crate::memory::InMemoryProfileStore;

/// Build the configured `ProfileStore`, creating its schema or indexes.
///
/// # Errors
/// Returns `BizkitError::Storage` if the backend cannot be opened and
/// `BizkitError::Config` if the backend was compiled out.
pub async fn build_profile_store(config: &StorageConfig) -> Result<Arc<dyn ProfileStore>> {
    let store: Arc<dyn ProfileStore> = match config.backend {
        StorageBackend::Sqlite => {
            let sqlite = config.sqlite.clone();
            let manager = tokio::task::spawn_blocking(move || {
                let manager = DbManager::new(&sqlite.path, sqlite.pool_size)?;
                manager.run_migrations()?;
                Ok::<_, BizkitError>(manager)
            })
            .await
            .map_err(|e| BizkitError::Internal(format!("sqlite setup task failed: {e}")))??;
            Arc::new(SqliteProfileStore::new(Arc::new(manager)))
        }
        StorageBackend::Mongodb => mongo_store(config).await?,
        StorageBackend::File => Arc::new(JsonFileProfileStore::open(&config.file.directory).await?),
        StorageBackend::Memory => Arc::new(InMemoryProfileStore::new()),
    };

    info!(backend = store.backend_name(), "profile store ready");
    Ok(store)
}

#[cfg(feature = "document-store")]
async fn mongo_store(config: &StorageConfig) -> Result<Arc<dyn ProfileStore>> {
    let store = crate::document::MongoProfileStore::connect(&config.mongodb).await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "document-store"))]
async fn mongo_store(_config: &StorageConfig) -> Result<Arc<dyn ProfileStore>> {
    Err(BizkitError::Config(
        "storage.backend = \"mongodb\" requires the `document-store` feature".into(),
    ))
}

/// Build the configured text generator, or `None` for template-only mode.
///
/// # Errors
/// Returns `BizkitError::Config` when a provider is selected without an
/// API key.
pub fn build_text_generator(config: &EnhancerConfig) -> Result<Option<Arc<dyn TextGenerator>>> {
    if config.provider == TextProvider::None {
        info!("no text provider configured; enhancements use the template");
        return Ok(None);
    }

    let api_key = config
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            BizkitError::Config(format!("enhancer.api_key is required for provider {}", config.provider))
        })?;

    let http = HttpClient::builder()
        .timeout(Duration::from_secs(config.effective_timeout_seconds()))
        .build()?;

    let generator: Arc<dyn TextGenerator> = match config.provider {
        TextProvider::Openai => {
            let mut client = OpenAIClient::new(api_key, http);
            if let Some(model) = &config.model {
                client = client.with_model(model.clone());
            }
            if let Some(url) = &config.api_url {
                client = client.with_base_url(url);
            }
            Arc::new(client)
        }
        TextProvider::Gemini => {
            let mut client = GeminiClient::new(api_key, http);
            if let Some(model) = &config.model {
                client = client.with_model(model.clone());
            }
            if let Some(url) = &config.api_url {
                client = client.with_base_url(url);
            }
            Arc::new(client)
        }
        TextProvider::None => return Ok(None),
    };

    info!(provider = generator.provider_name(), "text generator ready");
    Ok(Some(generator))
}

/// Build the configured identity provider.
///
/// # Errors
/// Returns `BizkitError::Config` for JWT mode without a secret.
pub fn build_identity_provider(config: &AuthConfig) -> Result<Arc<dyn IdentityProvider>> {
    match config.mode {
        AuthMode::Fixed => {
            tracing::warn!(owner_id = %config.fixed_owner_id, "fixed identity mode; every request acts as one owner");
            Ok(Arc::new(FixedIdentityProvider::new(config.fixed_owner_id.clone())))
        }
        AuthMode::Jwt => {
            let secret = config
                .jwt_secret
                .as_deref()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| BizkitError::Config("auth.jwt_secret is required in jwt mode".into()))?;
            Ok(Arc::new(JwtIdentityProvider::new(secret)))
        }
    }
}
