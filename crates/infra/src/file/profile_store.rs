//! Business profile store backed by one JSON document per owner
//!
//! Layout: `<directory>/<hex sha256(owner_id)>.json`, each file holding the
//! full camelCase `BusinessProfile`. Writes go to a temporary file in the
//! same directory and are renamed over the target, so a reader sees either
//! the old document or the new one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bizkit_core::{ProfileStore, ProfileWrite};
use bizkit_domain::utils::time::now_millis;
use bizkit_domain::{BizkitError, BusinessProfile, ProfileDraft, Result as DomainResult};
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::errors::InfraError;

/// Flat-file implementation of `ProfileStore`
pub struct JsonFileProfileStore {
    directory: PathBuf,
    // Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileProfileStore {
    /// Create the store, creating `directory` if needed.
    pub async fn open(directory: impl Into<PathBuf>) -> DomainResult<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory).await.map_err(io_error)?;
        Ok(Self { directory, write_lock: Mutex::new(()) })
    }

    /// Path of the document holding `owner_id`'s profile.
    pub fn document_path(&self, owner_id: &str) -> PathBuf {
        let digest = Sha256::digest(owner_id.as_bytes());
        self.directory.join(format!("{}.json", hex::encode(digest)))
    }

    async fn read_document(&self, owner_id: &str) -> DomainResult<Option<BusinessProfile>> {
        let path = self.document_path(owner_id);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error(err)),
        };

        let profile: BusinessProfile = serde_json::from_slice(&bytes)
            .map_err(|e| BizkitError::from(InfraError::from(e)))?;
        if profile.owner_id != owner_id {
            return Err(BizkitError::Storage(format!(
                "document {} belongs to a different owner",
                path.display()
            )));
        }
        Ok(Some(profile))
    }

    async fn write_document(&self, profile: &BusinessProfile) -> DomainResult<()> {
        let target = self.document_path(&profile.owner_id);
        let temp = temp_path(&target);
        let body = serde_json::to_vec_pretty(profile)
            .map_err(|e| BizkitError::from(InfraError::from(e)))?;

        let result = async {
            let mut file = fs::File::create(&temp).await?;
            file.write_all(&body).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&temp, &target).await
        }
        .await;

        if let Err(err) = result {
            let _ = fs::remove_file(&temp).await;
            return Err(io_error(err));
        }
        debug!(path = %target.display(), "wrote profile document");
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for JsonFileProfileStore {
    async fn upsert(&self, owner_id: &str, draft: ProfileDraft) -> DomainResult<ProfileWrite> {
        let _guard = self.write_lock.lock().await;

        let (profile, created) = match self.read_document(owner_id).await? {
            Some(existing) => (existing.revise(draft, now_millis()), false),
            None => (BusinessProfile::create(owner_id, draft, now_millis()), true),
        };
        self.write_document(&profile).await?;
        Ok(ProfileWrite { profile, created })
    }

    async fn find_by_owner(&self, owner_id: &str) -> DomainResult<Option<BusinessProfile>> {
        self.read_document(owner_id).await
    }

    async fn delete_by_owner(&self, owner_id: &str) -> DomainResult<bool> {
        let _guard = self.write_lock.lock().await;

        match fs::remove_file(self.document_path(owner_id)).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(io_error(err)),
        }
    }

    async fn health_check(&self) -> DomainResult<()> {
        let metadata = fs::metadata(&self.directory).await.map_err(io_error)?;
        if !metadata.is_dir() {
            return Err(BizkitError::Storage(format!(
                "{} is not a directory",
                self.directory.display()
            )));
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

fn temp_path(target: &Path) -> PathBuf {
    let name = target.file_name().and_then(|n| n.to_str()).unwrap_or("profile");
    target.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
}

fn io_error(err: std::io::Error) -> BizkitError {
    match err.kind() {
        // Missing directories are a storage failure, not a missing profile.
        std::io::ErrorKind::NotFound => BizkitError::Storage(format!("I/O error: {err}")),
        _ => BizkitError::from(InfraError::from(err)),
    }
}

#[cfg(test)]
mod tests {
    use bizkit_domain::{BusinessCategory, BusinessDetails, EnhancedProfile, SocialMedia};
    use tempfile::TempDir;

    use super::*;

    fn draft() -> ProfileDraft {
        ProfileDraft {
            details: BusinessDetails {
                name: "Joe's Cafe".into(),
                category: BusinessCategory::FoodAndBeverage,
                description: "Coffee shop".into(),
                location: "Austin, TX".into(),
                contact_number: "555-0100".into(),
                additional_info: None,
                target_audience: None,
                years_in_business: None,
                employee_count: None,
                website: None,
                social_media: SocialMedia::default(),
            },
            enhanced_profile: EnhancedProfile::template(
                "Joe's Cafe",
                BusinessCategory::FoodAndBeverage,
                "Austin, TX",
                "Coffee shop",
            ),
        }
    }

    #[tokio::test]
    async fn document_is_named_by_owner_hash() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileProfileStore::open(dir.path()).await.unwrap();

        store.upsert("user-1", draft()).await.unwrap();

        let expected = dir.path().join(format!("{}.json", hex::encode(Sha256::digest(b"user-1"))));
        assert!(expected.exists());
        assert_eq!(store.document_path("user-1"), expected);

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&expected).unwrap()).unwrap();
        assert_eq!(raw["ownerId"], "user-1");
        assert!(raw.get("employeeCount").is_none());
    }

    #[tokio::test]
    async fn no_temp_files_are_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileProfileStore::open(dir.path()).await.unwrap();

        store.upsert("user-1", draft()).await.unwrap();
        store.upsert("user-1", draft()).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(".json"));
    }

    #[tokio::test]
    async fn corrupt_document_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileProfileStore::open(dir.path()).await.unwrap();
        std::fs::write(store.document_path("user-1"), b"{ not json").unwrap();

        assert!(matches!(store.find_by_owner("user-1").await, Err(BizkitError::Storage(_))));
    }

    #[tokio::test]
    async fn health_check_fails_when_directory_disappears() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("profiles");
        let store = JsonFileProfileStore::open(&root).await.unwrap();
        assert!(store.health_check().await.is_ok());

        std::fs::remove_dir_all(&root).unwrap();
        assert!(matches!(store.health_check().await, Err(BizkitError::Storage(_))));
    }
}
