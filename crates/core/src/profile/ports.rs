//! Port interfaces for business profile storage
//!
//! Every backend (relational, document, flat file, in-memory) implements
//! [`ProfileStore`] and must satisfy the same contract:
//!
//! - at most one profile per owner
//! - `upsert` replaces the whole record atomically, keeping `id` and
//!   `created_at` and moving `updated_at` strictly forward
//! - absent optional fields round-trip as absent
//! - `created` is decided by the same write that stores the profile, so of
//!   two concurrent first writes exactly one reports it

use async_trait::async_trait;
use bizkit_domain::{BusinessProfile, ProfileDraft, Result};

/// What one [`ProfileStore::upsert`] stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileWrite {
    pub profile: BusinessProfile,
    /// `true` when this write inserted the owner's first profile
    pub created: bool,
}

/// Trait for business profile persistence keyed by owner
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Create or fully replace the owner's profile and return what was stored
    async fn upsert(&self, owner_id: &str, draft: ProfileDraft) -> Result<ProfileWrite>;

    /// Get the owner's profile, if one exists
    async fn find_by_owner(&self, owner_id: &str) -> Result<Option<BusinessProfile>>;

    /// Delete the owner's profile. Returns `false` when there was none.
    async fn delete_by_owner(&self, owner_id: &str) -> Result<bool>;

    /// Verify the backend is reachable
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    /// Short backend label for logs
    fn backend_name(&self) -> &'static str;
}
