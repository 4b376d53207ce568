//! Business profile store backed by a MongoDB collection
//!
//! One document per owner, `_id` = profile id, unique index on `ownerId`.
//! Writes are a single `findOneAndUpdate` with `upsert`, so the parent
//! fields and the enhancement lists change together. Absent optional fields
//! are `$unset` rather than stored as null.

use std::time::Duration;

use async_trait::async_trait;
use bizkit_core::{ProfileStore, ProfileWrite};
use bizkit_domain::utils::time::now_millis;
use bizkit_domain::{
    BizkitError, BusinessDetails, BusinessProfile, EnhancedProfile, MongoConfig, ProfileDraft,
    Result as DomainResult,
};
use chrono::{DateTime, Utc};
use mongodb::bson::{self, doc, DateTime as BsonDateTime, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{info, warn};

use crate::errors::InfraError;

const DUPLICATE_KEY: i32 = 11000;
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Optional keys that must be removed when the new version omits them.
const OPTIONAL_FIELDS: [&str; 6] = [
    "additionalInfo",
    "targetAudience",
    "yearsInBusiness",
    "employeeCount",
    "website",
    "socialMedia",
];

/// MongoDB implementation of `ProfileStore`
pub struct MongoProfileStore {
    database: Database,
    collection: Collection<Document>,
}

impl MongoProfileStore {
    /// Connect using `config` and make sure the `ownerId` index exists.
    pub async fn connect(config: &MongoConfig) -> DomainResult<Self> {
        let mut options = ClientOptions::parse(&config.uri).await.map_err(mongo_error)?;
        if options.server_selection_timeout.is_none() {
            options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        }
        let client = Client::with_options(options).map_err(mongo_error)?;
        let database = client.database(&config.database);
        let collection = database.collection::<Document>(&config.collection);

        let store = Self { database, collection };
        store.ensure_indexes().await?;
        info!(database = %config.database, collection = %config.collection, "mongodb store ready");
        Ok(store)
    }

    async fn ensure_indexes(&self) -> DomainResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "ownerId": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await.map_err(mongo_error)?;
        Ok(())
    }

    async fn try_upsert(&self, owner_id: &str, draft: ProfileDraft) -> Result<ProfileWrite, StoreFailure> {
        let filter = doc! { "ownerId": owner_id };

        let existing = self.collection.find_one(filter.clone()).await?;
        let (profile, inserting) = match existing {
            Some(document) => (document_to_profile(document)?.revise(draft, now_millis()), false),
            None => (BusinessProfile::create(owner_id, draft, now_millis()), true),
        };

        let stored = self
            .collection
            .find_one_and_update(filter, update_document(&profile)?)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| BizkitError::Storage("upsert returned no document".into()))?;

        let stored = document_to_profile(stored)?;
        // `_id` is only written by `$setOnInsert`, so it matches ours only if
        // this call performed the insert.
        let created = inserting && stored.id == profile.id;
        Ok(ProfileWrite { profile: stored, created })
    }
}

#[async_trait]
impl ProfileStore for MongoProfileStore {
    async fn upsert(&self, owner_id: &str, draft: ProfileDraft) -> DomainResult<ProfileWrite> {
        match self.try_upsert(owner_id, draft.clone()).await {
            Ok(write) => Ok(write),
            // A concurrent first write won the insert; apply ours as an update.
            Err(StoreFailure::Mongo(err)) if is_duplicate_key(&err) => {
                warn!(owner_id, "concurrent profile insert; retrying as update");
                self.try_upsert(owner_id, draft).await.map_err(BizkitError::from)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_owner(&self, owner_id: &str) -> DomainResult<Option<BusinessProfile>> {
        self.collection
            .find_one(doc! { "ownerId": owner_id })
            .await
            .map_err(mongo_error)?
            .map(document_to_profile)
            .transpose()
    }

    async fn delete_by_owner(&self, owner_id: &str) -> DomainResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "ownerId": owner_id })
            .await
            .map_err(mongo_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> DomainResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await.map_err(mongo_error)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}

/// Keeps the raw driver error around long enough to inspect its code.
enum StoreFailure {
    Mongo(mongodb::error::Error),
    Domain(BizkitError),
}

impl From<mongodb::error::Error> for StoreFailure {
    fn from(value: mongodb::error::Error) -> Self {
        Self::Mongo(value)
    }
}

impl From<BizkitError> for StoreFailure {
    fn from(value: BizkitError) -> Self {
        Self::Domain(value)
    }
}

impl From<StoreFailure> for BizkitError {
    fn from(value: StoreFailure) -> Self {
        match value {
            StoreFailure::Mongo(err) => mongo_error(err),
            StoreFailure::Domain(err) => err,
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Command(command) => command.code == DUPLICATE_KEY,
        ErrorKind::Write(WriteFailure::WriteError(write)) => write.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn update_document(profile: &BusinessProfile) -> DomainResult<Document> {
    let mut set = bson::to_document(&profile.details).map_err(bson_error)?;
    set.insert("enhancedProfile", bson::to_bson(&profile.enhanced_profile).map_err(bson_error)?);
    set.insert("updatedAt", to_bson_datetime(profile.updated_at));

    let mut unset = Document::new();
    for key in OPTIONAL_FIELDS {
        if !set.contains_key(key) {
            unset.insert(key, "");
        }
    }

    let mut update = doc! {
        "$set": set,
        "$setOnInsert": {
            "_id": &profile.id,
            "ownerId": &profile.owner_id,
            "createdAt": to_bson_datetime(profile.created_at),
        },
    };
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    Ok(update)
}

fn document_to_profile(document: Document) -> DomainResult<BusinessProfile> {
    let id = document.get_str("_id").map_err(field_error)?.to_string();
    let owner_id = document.get_str("ownerId").map_err(field_error)?.to_string();
    let created_at = from_bson_datetime(*document.get_datetime("createdAt").map_err(field_error)?)?;
    let updated_at = from_bson_datetime(*document.get_datetime("updatedAt").map_err(field_error)?)?;
    let enhanced = document.get_document("enhancedProfile").map_err(field_error)?.clone();

    let enhanced_profile: EnhancedProfile = bson::from_document(enhanced).map_err(bson_error)?;
    // Unknown keys (_id, ownerId, timestamps) are ignored by BusinessDetails.
    let details: BusinessDetails = bson::from_document(document).map_err(bson_error)?;

    Ok(BusinessProfile { id, owner_id, details, enhanced_profile, created_at, updated_at })
}

fn to_bson_datetime(ts: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(ts.timestamp_millis())
}

fn from_bson_datetime(ts: BsonDateTime) -> DomainResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ts.timestamp_millis())
        .ok_or_else(|| BizkitError::Storage(format!("invalid stored timestamp: {ts}")))
}

fn mongo_error(err: mongodb::error::Error) -> BizkitError {
    BizkitError::from(InfraError::from(err))
}

fn bson_error(err: impl std::fmt::Display) -> BizkitError {
    BizkitError::Storage(format!("malformed stored document: {err}"))
}

fn field_error(err: bson::document::ValueAccessError) -> BizkitError {
    BizkitError::Storage(format!("malformed stored document: {err}"))
}
