//! Behaviour every `ProfileStore` backend must share.
//!
//! Each check takes a fresh store and uses its own owner ids, so backends
//! can run the whole list against one instance.

use std::sync::Arc;

use bizkit_core::ProfileStore;

use super::{draft, template_draft};

pub async fn missing_owner_reads_as_absent(store: Arc<dyn ProfileStore>) {
    assert_eq!(store.find_by_owner("contract-missing").await.unwrap(), None);
    assert!(!store.delete_by_owner("contract-missing").await.unwrap());
}

pub async fn first_upsert_creates_profile(store: Arc<dyn ProfileStore>) {
    let write = store.upsert("contract-create", draft(Some(12))).await.unwrap();
    assert!(write.created);

    let created = write.profile;
    assert!(!created.id.is_empty());
    assert_eq!(created.owner_id, "contract-create");
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.details, draft(Some(12)).details);
    assert_eq!(created.enhanced_profile, draft(Some(12)).enhanced_profile);

    let found = store.find_by_owner("contract-create").await.unwrap().expect("profile stored");
    assert_eq!(found, created);
}

pub async fn second_upsert_replaces_in_place(store: Arc<dyn ProfileStore>) {
    let first = store.upsert("contract-update", draft(Some(12))).await.unwrap();
    let second = store.upsert("contract-update", template_draft(None)).await.unwrap();
    assert!(first.created);
    assert!(!second.created);
    let (first, second) = (first.profile, second.profile);

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.enhanced_profile, template_draft(None).enhanced_profile);

    let found = store.find_by_owner("contract-update").await.unwrap().expect("profile stored");
    assert_eq!(found, second);
    assert_eq!(found.details.employee_count, None);
}

pub async fn enhancement_lists_keep_their_order(store: Arc<dyn ProfileStore>) {
    store.upsert("contract-order", draft(None)).await.unwrap();

    let found = store.find_by_owner("contract-order").await.unwrap().expect("profile stored");
    let expected = draft(None).enhanced_profile;
    assert_eq!(found.enhanced_profile.strengths, expected.strengths);
    assert_eq!(found.enhanced_profile.target_segments, expected.target_segments);
    assert_eq!(found.enhanced_profile.marketing_suggestions, expected.marketing_suggestions);
}

pub async fn delete_is_idempotent(store: Arc<dyn ProfileStore>) {
    store.upsert("contract-delete", draft(None)).await.unwrap();

    assert!(store.delete_by_owner("contract-delete").await.unwrap());
    assert_eq!(store.find_by_owner("contract-delete").await.unwrap(), None);
    assert!(!store.delete_by_owner("contract-delete").await.unwrap());
}

pub async fn owners_are_isolated(store: Arc<dyn ProfileStore>) {
    let a = store.upsert("contract-owner-a", draft(Some(1))).await.unwrap();
    let b = store.upsert("contract-owner-b", draft(Some(2))).await.unwrap();
    assert!(a.created && b.created);
    assert_ne!(a.profile.id, b.profile.id);

    store.delete_by_owner("contract-owner-a").await.unwrap();
    let remaining = store.find_by_owner("contract-owner-b").await.unwrap().expect("b untouched");
    assert_eq!(remaining.details.employee_count, Some(2));
}

pub async fn concurrent_upserts_keep_one_profile(store: Arc<dyn ProfileStore>) {
    let mut handles = Vec::new();
    for n in 0..8u32 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.upsert("contract-race", draft(Some(n + 1))).await
        }));
    }

    let mut ids = Vec::new();
    let mut creates = 0;
    for handle in handles {
        let write = handle.await.unwrap().unwrap();
        if write.created {
            creates += 1;
        }
        ids.push(write.profile.id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1, "every write must land on the same profile");
    assert_eq!(creates, 1, "exactly one write inserts the profile");

    let found = store.find_by_owner("contract-race").await.unwrap().expect("profile stored");
    assert_eq!(found.id, ids[0]);
}

/// Run every check above against `store`.
pub async fn run_all(store: Arc<dyn ProfileStore>) {
    store.health_check().await.unwrap();
    missing_owner_reads_as_absent(Arc::clone(&store)).await;
    first_upsert_creates_profile(Arc::clone(&store)).await;
    second_upsert_replaces_in_place(Arc::clone(&store)).await;
    enhancement_lists_keep_their_order(Arc::clone(&store)).await;
    delete_is_idempotent(Arc::clone(&store)).await;
    owners_are_isolated(Arc::clone(&store)).await;
    concurrent_upserts_keep_one_profile(store).await;
}
