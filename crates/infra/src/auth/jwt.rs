//! HS256 bearer-token identity provider

use async_trait::async_trait;
use bizkit_core::IdentityProvider;
use bizkit_domain::{BizkitError, OwnerIdentity, Result};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::InfraError;

pub const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims we read from the token payload.
///
/// The owner is taken from `sub`, then `firebaseUid`, then `user.id`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnerClaims {
    sub: Option<String>,
    firebase_uid: Option<String>,
    user: Option<UserClaim>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserClaim {
    id: Option<Value>,
}

impl OwnerClaims {
    fn owner_id(&self) -> Option<String> {
        let from_user = self.user.as_ref().and_then(|user| match user.id.as_ref()? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        });

        [self.sub.clone(), self.firebase_uid.clone(), from_user]
            .into_iter()
            .flatten()
            .map(|id| id.trim().to_string())
            .find(|id| !id.is_empty())
    }
}

/// Verifies HS256 tokens signed with a shared secret.
pub struct JwtIdentityProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(JWT_ALGORITHM),
        }
    }
}

impl std::fmt::Debug for JwtIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIdentityProvider").field("algorithm", &JWT_ALGORITHM).finish_non_exhaustive()
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn identify(&self, token: Option<&str>) -> Result<OwnerIdentity> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BizkitError::Auth("No token, authorization denied".into()))?;

        let data = decode::<OwnerClaims>(token, &self.key, &self.validation).map_err(|e| {
            debug!(error = %e, "token rejected");
            BizkitError::from(InfraError::from(e))
        })?;

        let owner_id = data
            .claims
            .owner_id()
            .ok_or_else(|| BizkitError::Auth("token does not identify a user".into()))?;

        let identity = OwnerIdentity::new(owner_id);
        Ok(match data.claims.email {
            Some(email) => identity.with_email(email),
            None => identity,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "test-secret";

    fn token(claims: Value, secret: &str) -> String {
        encode(&Header::new(JWT_ALGORITHM), &claims, &EncodingKey::from_secret(secret.as_bytes()))
            .unwrap()
    }

    fn expiry() -> i64 {
        Utc::now().timestamp() + 3600
    }

    #[tokio::test]
    async fn subject_claim_identifies_owner() {
        let provider = JwtIdentityProvider::new(SECRET);
        let jwt = token(json!({ "sub": "user-1", "email": "joe@example.com", "exp": expiry() }), SECRET);

        let identity = provider.identify(Some(&jwt)).await.unwrap();
        assert_eq!(identity, OwnerIdentity::new("user-1").with_email("joe@example.com"));
    }

    #[tokio::test]
    async fn nested_user_id_is_accepted() {
        let provider = JwtIdentityProvider::new(SECRET);
        let jwt = token(json!({ "user": { "id": 42 }, "exp": expiry() }), SECRET);

        let identity = provider.identify(Some(&jwt)).await.unwrap();
        assert_eq!(identity.owner_id, "42");
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let provider = JwtIdentityProvider::new(SECRET);

        assert!(matches!(provider.identify(None).await, Err(BizkitError::Auth(_))));
        assert!(matches!(provider.identify(Some("  ")).await, Err(BizkitError::Auth(_))));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let provider = JwtIdentityProvider::new(SECRET);
        let jwt = token(json!({ "sub": "user-1", "exp": expiry() }), "other-secret");

        let err = provider.identify(Some(&jwt)).await.unwrap_err();
        assert_eq!(err, BizkitError::Auth("token signature is invalid".into()));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let provider = JwtIdentityProvider::new(SECRET);
        let jwt = token(json!({ "sub": "user-1", "exp": Utc::now().timestamp() - 3600 }), SECRET);

        let err = provider.identify(Some(&jwt)).await.unwrap_err();
        assert_eq!(err, BizkitError::Auth("token has expired".into()));
    }

    #[tokio::test]
    async fn token_without_owner_is_rejected() {
        let provider = JwtIdentityProvider::new(SECRET);
        let jwt = token(json!({ "sub": "  ", "exp": expiry() }), SECRET);

        assert!(matches!(provider.identify(Some(&jwt)).await, Err(BizkitError::Auth(_))));
    }
}
