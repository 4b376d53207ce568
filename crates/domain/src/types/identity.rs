//! Caller identity types

use serde::{Deserialize, Serialize};

/// Identity supplied by the authentication collaborator.
///
/// The profile pipeline trusts this value as given; `owner_id` keys the
/// caller's single business profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerIdentity {
    pub owner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl OwnerIdentity {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self { owner_id: owner_id.into(), email: None }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
