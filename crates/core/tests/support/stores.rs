//! Mock `ProfileStore` implementations for testing

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bizkit_core::{ProfileStore, ProfileWrite};
use bizkit_domain::utils::time::now_millis;
use bizkit_domain::{BizkitError, BusinessProfile, ProfileDraft, Result as DomainResult};
use parking_lot::Mutex;

/// In-memory mock that counts writes.
#[derive(Default, Clone)]
pub struct MockProfileStore {
    profiles: Arc<Mutex<HashMap<String, BusinessProfile>>>,
    writes: Arc<AtomicUsize>,
}

impl MockProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `upsert` calls seen so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.profiles.lock().len()
    }
}

#[async_trait]
impl ProfileStore for MockProfileStore {
    async fn upsert(&self, owner_id: &str, draft: ProfileDraft) -> DomainResult<ProfileWrite> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut profiles = self.profiles.lock();
        let (next, created) = match profiles.get(owner_id) {
            Some(existing) => (existing.revise(draft, now_millis()), false),
            None => (BusinessProfile::create(owner_id, draft, now_millis()), true),
        };
        profiles.insert(owner_id.to_string(), next.clone());
        Ok(ProfileWrite { profile: next, created })
    }

    async fn find_by_owner(&self, owner_id: &str) -> DomainResult<Option<BusinessProfile>> {
        Ok(self.profiles.lock().get(owner_id).cloned())
    }

    async fn delete_by_owner(&self, owner_id: &str) -> DomainResult<bool> {
        Ok(self.profiles.lock().remove(owner_id).is_some())
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

/// Store whose every operation fails with `BizkitError::Storage`.
#[derive(Default, Clone)]
pub struct UnavailableProfileStore;

#[async_trait]
impl ProfileStore for UnavailableProfileStore {
    async fn upsert(&self, _owner_id: &str, _draft: ProfileDraft) -> DomainResult<ProfileWrite> {
        Err(BizkitError::Storage("backend unreachable".into()))
    }

    async fn find_by_owner(&self, _owner_id: &str) -> DomainResult<Option<BusinessProfile>> {
        Err(BizkitError::Storage("backend unreachable".into()))
    }

    async fn delete_by_owner(&self, _owner_id: &str) -> DomainResult<bool> {
        Err(BizkitError::Storage("backend unreachable".into()))
    }

    async fn health_check(&self) -> DomainResult<()> {
        Err(BizkitError::Storage("backend unreachable".into()))
    }

    fn backend_name(&self) -> &'static str {
        "unavailable"
    }
}

/// Store that reads fine but rejects writes.
#[derive(Default, Clone)]
pub struct ReadOnlyProfileStore {
    inner: MockProfileStore,
}

#[async_trait]
impl ProfileStore for ReadOnlyProfileStore {
    async fn upsert(&self, _owner_id: &str, _draft: ProfileDraft) -> DomainResult<ProfileWrite> {
        Err(BizkitError::Storage("write rejected".into()))
    }

    async fn find_by_owner(&self, owner_id: &str) -> DomainResult<Option<BusinessProfile>> {
        self.inner.find_by_owner(owner_id).await
    }

    async fn delete_by_owner(&self, owner_id: &str) -> DomainResult<bool> {
        self.inner.delete_by_owner(owner_id).await
    }

    fn backend_name(&self) -> &'static str {
        "read-only"
    }
}
