//! In-memory business profile store

use std::collections::HashMap;

use async_trait::async_trait;
use bizkit_core::{ProfileStore, ProfileWrite};
use bizkit_domain::utils::time::now_millis;
use bizkit_domain::{BusinessProfile, ProfileDraft, Result as DomainResult};
use parking_lot::RwLock;

/// `ProfileStore` kept in a single map behind one lock.
///
/// Nothing survives a restart. Useful for local development and as the
/// reference backend in contract tests.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, BusinessProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn upsert(&self, owner_id: &str, draft: ProfileDraft) -> DomainResult<ProfileWrite> {
        let mut profiles = self.profiles.write();
        let (profile, created) = match profiles.get(owner_id) {
            Some(existing) => (existing.revise(draft, now_millis()), false),
            None => (BusinessProfile::create(owner_id, draft, now_millis()), true),
        };
        profiles.insert(owner_id.to_string(), profile.clone());
        Ok(ProfileWrite { profile, created })
    }

    async fn find_by_owner(&self, owner_id: &str) -> DomainResult<Option<BusinessProfile>> {
        Ok(self.profiles.read().get(owner_id).cloned())
    }

    async fn delete_by_owner(&self, owner_id: &str) -> DomainResult<bool> {
        Ok(self.profiles.write().remove(owner_id).is_some())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
