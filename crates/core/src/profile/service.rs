//! Business profile service - core business logic

use std::sync::Arc;

use bizkit_domain::{BizkitError, BusinessProfile, ProfileDraft, ProfileFields, Result};
use tracing::{error, info};

use super::ports::{ProfileStore, ProfileWrite};
use crate::enhancement::{EnhancementRequest, ProfileEnhancer};

/// Business profile service
///
/// Validates input, enhances it, and writes exactly once to the store.
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
    enhancer: Arc<ProfileEnhancer>,
}

impl ProfileService {
    /// Create a new profile service
    pub fn new(store: Arc<dyn ProfileStore>, enhancer: Arc<ProfileEnhancer>) -> Self {
        Self { store, enhancer }
    }

    /// Underlying store, for health checks
    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    /// Validate, enhance and persist the owner's profile
    ///
    /// # Errors
    /// - `BizkitError::Validation` for a blank owner or invalid fields; the
    ///   store is not touched
    /// - `BizkitError::Storage` when the backend fails
    pub async fn create_or_update(
        &self,
        owner_id: &str,
        fields: ProfileFields,
    ) -> Result<ProfileWrite> {
        let owner_id = require_owner(owner_id)?;
        let details = fields.validate()?;

        let outcome = self.enhancer.enhance_detailed(EnhancementRequest::from(&details)).await;
        let draft = ProfileDraft { details, enhanced_profile: outcome.profile };

        let write = self.store.upsert(owner_id, draft).await.inspect_err(|err| {
            error!(owner_id, backend = self.store.backend_name(), error = %err, "Profile write failed");
        })?;

        info!(
            owner_id,
            profile_id = %write.profile.id,
            created = write.created,
            source = outcome.source.as_str(),
            backend = self.store.backend_name(),
            "Saved business profile"
        );
        Ok(write)
    }

    /// Get the owner's profile; `None` when there is none
    ///
    /// # Errors
    /// `BizkitError::Validation` for a blank owner, `BizkitError::Storage`
    /// when the backend fails.
    pub async fn get(&self, owner_id: &str) -> Result<Option<BusinessProfile>> {
        let owner_id = require_owner(owner_id)?;
        self.store.find_by_owner(owner_id).await
    }

    /// Delete the owner's profile; `false` when nothing was deleted
    ///
    /// # Errors
    /// `BizkitError::Validation` for a blank owner, `BizkitError::Storage`
    /// when the backend fails.
    pub async fn delete(&self, owner_id: &str) -> Result<bool> {
        let owner_id = require_owner(owner_id)?;
        let deleted = self.store.delete_by_owner(owner_id).await?;
        info!(owner_id, deleted, backend = self.store.backend_name(), "Deleted business profile");
        Ok(deleted)
    }
}

fn require_owner(owner_id: &str) -> Result<&str> {
    let trimmed = owner_id.trim();
    if trimmed.is_empty() {
        return Err(BizkitError::Validation("Owner id is required".into()));
    }
    Ok(trimmed)
}
