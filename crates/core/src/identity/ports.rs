//! Port interface for the authentication collaborator

use async_trait::async_trait;
use bizkit_domain::{OwnerIdentity, Result};

/// Resolves a request credential into the owner it acts for
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Identify the caller from an optional bearer credential.
    ///
    /// Returns `BizkitError::Auth` when the credential is missing or invalid.
    async fn identify(&self, token: Option<&str>) -> Result<OwnerIdentity>;
}
