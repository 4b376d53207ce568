//! Development identity provider that ignores credentials.

use async_trait::async_trait;
use bizkit_core::IdentityProvider;
use bizkit_domain::{OwnerIdentity, Result};

/// Resolves every request to one configured owner.
///
/// Intended for local development only; `AuthMode::Fixed` must be chosen
/// explicitly in configuration.
#[derive(Debug, Clone)]
pub struct FixedIdentityProvider {
    owner_id: String,
}

impl FixedIdentityProvider {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self { owner_id: owner_id.into() }
    }
}

#[async_trait]
impl IdentityProvider for FixedIdentityProvider {
    async fn identify(&self, _token: Option<&str>) -> Result<OwnerIdentity> {
        Ok(OwnerIdentity::new(self.owner_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ignores_the_credential() {
        let provider = FixedIdentityProvider::new("test-user-id");

        let anonymous = provider.identify(None).await.unwrap();
        let with_token = provider.identify(Some("garbage")).await.unwrap();

        assert_eq!(anonymous.owner_id, "test-user-id");
        assert_eq!(with_token, anonymous);
    }
}
