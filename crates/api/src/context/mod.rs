//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use bizkit_core::{IdentityProvider, ProfileEnhancer, ProfileService, ProfileStore, TextGenerator};
use bizkit_domain::{Config, Result};
use bizkit_infra::{build_identity_provider, build_profile_store, build_text_generator};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub profiles: Arc<ProfileService>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppContext {
    /// Build every adapter named by `config` and wire the services.
    ///
    /// # Errors
    /// Fails when the configuration is inconsistent or the storage backend
    /// cannot be opened.
    pub async fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let store = build_profile_store(&config.storage).await?;
        let generator = build_text_generator(&config.enhancer)?;
        let identity = build_identity_provider(&config.auth)?;

        let context = Self::from_parts(config, store, generator, identity);
        info!(
            backend = context.profiles.store().backend_name(),
            auth_mode = %context.config.auth.mode,
            provider = %context.config.enhancer.provider,
            "application context initialised"
        );
        Ok(context)
    }

    /// Assemble a context from already-built adapters.
    pub fn from_parts(
        config: Config,
        store: Arc<dyn ProfileStore>,
        generator: Option<Arc<dyn TextGenerator>>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let timeout = Duration::from_secs(config.enhancer.effective_timeout_seconds());
        let enhancer = Arc::new(ProfileEnhancer::new(generator, timeout));
        let profiles = Arc::new(ProfileService::new(store, enhancer));

        Self { config, profiles, identity }
    }
}
