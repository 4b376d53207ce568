//! Business profile store implementation using SQLite
//!
//! The parent record lives in `businesses`; the three enhancement lists live
//! in child tables keyed by `(business_id, position)`. Every upsert runs in a
//! single `IMMEDIATE` transaction so readers never observe a profile whose
//! lists belong to a different write.

use std::sync::Arc;

use async_trait::async_trait;
use bizkit_core::{ProfileStore, ProfileWrite};
use bizkit_domain::utils::time::now_millis;
use bizkit_domain::{
    BizkitError, BusinessCategory, BusinessDetails, BusinessProfile, EnhancedProfile,
    ProfileDraft, Result as DomainResult, SocialMedia,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use tokio::task;

use super::manager::{map_sql_error, DbManager};

const STRENGTHS_TABLE: &str = "business_strengths";
const SEGMENTS_TABLE: &str = "business_target_segments";
const SUGGESTIONS_TABLE: &str = "business_marketing_suggestions";

/// SQLite-backed implementation of `ProfileStore`
pub struct SqliteProfileStore {
    db: Arc<DbManager>,
}

impl SqliteProfileStore {
    /// Create a new store instance. The schema must already exist.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn upsert(&self, owner_id: &str, draft: ProfileDraft) -> DomainResult<ProfileWrite> {
        let db = Arc::clone(&self.db);
        let owner_id = owner_id.to_string();

        task::spawn_blocking(move || -> DomainResult<ProfileWrite> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let (profile, created) = match load_profile(&tx, &owner_id)? {
                Some(existing) => {
                    let revised = existing.revise(draft, now_millis());
                    update_business(&tx, &revised).map_err(map_sql_error)?;
                    (revised, false)
                }
                None => {
                    let inserted = BusinessProfile::create(&owner_id, draft, now_millis());
                    insert_business(&tx, &inserted).map_err(map_sql_error)?;
                    (inserted, true)
                }
            };
            replace_lists(&tx, &profile).map_err(map_sql_error)?;

            tx.commit().map_err(map_sql_error)?;
            Ok(ProfileWrite { profile, created })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_owner(&self, owner_id: &str) -> DomainResult<Option<BusinessProfile>> {
        let db = Arc::clone(&self.db);
        let owner_id = owner_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<BusinessProfile>> {
            let mut conn = db.get_connection()?;
            // Deferred transaction: parent row and lists come from one snapshot.
            let tx = conn.transaction().map_err(map_sql_error)?;
            let profile = load_profile(&tx, &owner_id)?;
            tx.commit().map_err(map_sql_error)?;
            Ok(profile)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete_by_owner(&self, owner_id: &str) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);
        let owner_id = owner_id.to_string();

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let deleted = conn
                .execute("DELETE FROM businesses WHERE owner_id = ?1", params![&owner_id])
                .map_err(map_sql_error)?;
            Ok(deleted > 0)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn health_check(&self) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || db.health_check()).await.map_err(map_join_error)?
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

/// Parent row as stored, before list and timestamp conversion.
struct BusinessRow {
    id: String,
    owner_id: String,
    name: String,
    category: String,
    description: String,
    location: String,
    contact_number: String,
    additional_info: Option<String>,
    target_audience: Option<String>,
    years_in_business: Option<u32>,
    employee_count: Option<u32>,
    website: Option<String>,
    facebook: Option<String>,
    instagram: Option<String>,
    twitter: Option<String>,
    linkedin: Option<String>,
    enhanced_description: String,
    created_at: i64,
    updated_at: i64,
}

fn map_business_row(row: &Row<'_>) -> rusqlite::Result<BusinessRow> {
    Ok(BusinessRow {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        category: row.get(3)?,
        description: row.get(4)?,
        location: row.get(5)?,
        contact_number: row.get(6)?,
        additional_info: row.get(7)?,
        target_audience: row.get(8)?,
        years_in_business: row.get(9)?,
        employee_count: row.get(10)?,
        website: row.get(11)?,
        facebook: row.get(12)?,
        instagram: row.get(13)?,
        twitter: row.get(14)?,
        linkedin: row.get(15)?,
        enhanced_description: row.get(16)?,
        created_at: row.get(17)?,
        updated_at: row.get(18)?,
    })
}

fn load_profile(conn: &Connection, owner_id: &str) -> DomainResult<Option<BusinessProfile>> {
    let row = conn
        .query_row(
            "SELECT id, owner_id, name, category, description, location, contact_number,
                    additional_info, target_audience, years_in_business, employee_count,
                    website, facebook, instagram, twitter, linkedin, enhanced_description,
                    created_at, updated_at
             FROM businesses WHERE owner_id = ?1",
            params![owner_id],
            map_business_row,
        )
        .optional()
        .map_err(map_sql_error)?;

    let Some(row) = row else {
        return Ok(None);
    };

    let strengths = load_list(conn, STRENGTHS_TABLE, &row.id).map_err(map_sql_error)?;
    let target_segments = load_list(conn, SEGMENTS_TABLE, &row.id).map_err(map_sql_error)?;
    let marketing_suggestions =
        load_list(conn, SUGGESTIONS_TABLE, &row.id).map_err(map_sql_error)?;

    let category = row.category.parse::<BusinessCategory>().map_err(BizkitError::Storage)?;

    Ok(Some(BusinessProfile {
        id: row.id,
        owner_id: row.owner_id,
        details: BusinessDetails {
            name: row.name,
            category,
            description: row.description,
            location: row.location,
            contact_number: row.contact_number,
            additional_info: row.additional_info,
            target_audience: row.target_audience,
            years_in_business: row.years_in_business,
            employee_count: row.employee_count,
            website: row.website,
            social_media: SocialMedia {
                facebook: row.facebook,
                instagram: row.instagram,
                twitter: row.twitter,
                linkedin: row.linkedin,
            },
        },
        enhanced_profile: EnhancedProfile {
            enhanced_description: row.enhanced_description,
            strengths,
            target_segments,
            marketing_suggestions,
        },
        created_at: from_millis(row.created_at)?,
        updated_at: from_millis(row.updated_at)?,
    }))
}

fn load_list(conn: &Connection, table: &str, business_id: &str) -> rusqlite::Result<Vec<String>> {
    let sql = format!("SELECT value FROM {table} WHERE business_id = ?1 ORDER BY position");
    let mut stmt = conn.prepare_cached(&sql)?;
    let values = stmt.query_map(params![business_id], |row| row.get(0))?;
    values.collect()
}

fn insert_business(conn: &Connection, profile: &BusinessProfile) -> rusqlite::Result<()> {
    let d = &profile.details;
    conn.execute(
        "INSERT INTO businesses (
            id, owner_id, name, category, description, location, contact_number,
            additional_info, target_audience, years_in_business, employee_count,
            website, facebook, instagram, twitter, linkedin, enhanced_description,
            created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
        params![
            profile.id,
            profile.owner_id,
            d.name,
            d.category.as_str(),
            d.description,
            d.location,
            d.contact_number,
            d.additional_info,
            d.target_audience,
            d.years_in_business,
            d.employee_count,
            d.website,
            d.social_media.facebook,
            d.social_media.instagram,
            d.social_media.twitter,
            d.social_media.linkedin,
            profile.enhanced_profile.enhanced_description,
            profile.created_at.timestamp_millis(),
            profile.updated_at.timestamp_millis(),
        ],
    )?;
    Ok(())
}

fn update_business(conn: &Connection, profile: &BusinessProfile) -> rusqlite::Result<()> {
    let d = &profile.details;
    conn.execute(
        "UPDATE businesses SET
            name = ?2, category = ?3, description = ?4, location = ?5, contact_number = ?6,
            additional_info = ?7, target_audience = ?8, years_in_business = ?9,
            employee_count = ?10, website = ?11, facebook = ?12, instagram = ?13,
            twitter = ?14, linkedin = ?15, enhanced_description = ?16, updated_at = ?17
         WHERE id = ?1",
        params![
            profile.id,
            d.name,
            d.category.as_str(),
            d.description,
            d.location,
            d.contact_number,
            d.additional_info,
            d.target_audience,
            d.years_in_business,
            d.employee_count,
            d.website,
            d.social_media.facebook,
            d.social_media.instagram,
            d.social_media.twitter,
            d.social_media.linkedin,
            profile.enhanced_profile.enhanced_description,
            profile.updated_at.timestamp_millis(),
        ],
    )?;
    Ok(())
}

fn replace_lists(conn: &Connection, profile: &BusinessProfile) -> rusqlite::Result<()> {
    let enhanced = &profile.enhanced_profile;
    for (table, values) in [
        (STRENGTHS_TABLE, &enhanced.strengths),
        (SEGMENTS_TABLE, &enhanced.target_segments),
        (SUGGESTIONS_TABLE, &enhanced.marketing_suggestions),
    ] {
        conn.execute(&format!("DELETE FROM {table} WHERE business_id = ?1"), params![profile.id])?;

        let mut stmt = conn.prepare_cached(&format!(
            "INSERT INTO {table} (business_id, position, value) VALUES (?1, ?2, ?3)"
        ))?;
        for (position, value) in values.iter().enumerate() {
            stmt.execute(params![profile.id, position as i64, value])?;
        }
    }
    Ok(())
}

fn from_millis(ms: i64) -> DomainResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| BizkitError::Storage(format!("invalid stored timestamp: {ms}")))
}

fn map_join_error(err: task::JoinError) -> BizkitError {
    if err.is_cancelled() {
        BizkitError::Internal("blocking task cancelled".into())
    } else {
        BizkitError::Internal(format!("blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn setup_test_db() -> (SqliteProfileStore, Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db = Arc::new(DbManager::new(temp_dir.path().join("test.db"), 2).expect("db"));
        db.run_migrations().expect("migrations run");
        (SqliteProfileStore::new(Arc::clone(&db)), db, temp_dir)
    }

    fn draft(name: &str, strengths: &[&str]) -> ProfileDraft {
        let mut enhanced = EnhancedProfile::template(
            name,
            BusinessCategory::Retail,
            "Austin, TX",
            "Corner shop",
        );
        enhanced.strengths = strengths.iter().map(|s| (*s).to_string()).collect();
        ProfileDraft {
            details: BusinessDetails {
                name: name.to_string(),
                category: BusinessCategory::Retail,
                description: "Corner shop".into(),
                location: "Austin, TX".into(),
                contact_number: "555-0100".into(),
                additional_info: None,
                target_audience: Some("Neighbours".into()),
                years_in_business: Some(0),
                employee_count: None,
                website: None,
                social_media: SocialMedia::default(),
            },
            enhanced_profile: enhanced,
        }
    }

    fn count_rows(db: &DbManager, table: &str) -> i64 {
        let conn = db.get_connection().unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0)).unwrap()
    }

    #[tokio::test]
    async fn update_replaces_child_lists() {
        let (store, db, _dir) = setup_test_db();

        let first = store.upsert("owner-1", draft("Shop", &["a", "b", "c", "d", "e"])).await.unwrap();
        let second = store.upsert("owner-1", draft("Shop", &["only"])).await.unwrap();
        assert!(first.created);
        assert!(!second.created);

        let updated = second.profile;
        assert_eq!(updated.enhanced_profile.strengths, vec!["only"]);
        assert_eq!(count_rows(&db, "businesses"), 1);
        assert_eq!(count_rows(&db, STRENGTHS_TABLE), 1);

        let loaded = store.find_by_owner("owner-1").await.unwrap().unwrap();
        assert_eq!(loaded, updated);
    }

    #[tokio::test]
    async fn delete_cascades_to_child_rows() {
        let (store, db, _dir) = setup_test_db();

        store.upsert("owner-1", draft("Shop", &["a", "b"])).await.unwrap();
        assert!(store.delete_by_owner("owner-1").await.unwrap());

        assert_eq!(count_rows(&db, "businesses"), 0);
        assert_eq!(count_rows(&db, STRENGTHS_TABLE), 0);
        assert_eq!(count_rows(&db, SEGMENTS_TABLE), 0);
        assert_eq!(count_rows(&db, SUGGESTIONS_TABLE), 0);
    }

    #[tokio::test]
    async fn nulls_round_trip_as_absent() {
        let (store, db, _dir) = setup_test_db();
        store.upsert("owner-1", draft("Shop", &["a"])).await.unwrap();

        let conn = db.get_connection().unwrap();
        let employees: Option<i64> = conn
            .query_row("SELECT employee_count FROM businesses WHERE owner_id = 'owner-1'", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(employees, None);

        let loaded = store.find_by_owner("owner-1").await.unwrap().unwrap();
        assert_eq!(loaded.details.employee_count, None);
        assert_eq!(loaded.details.years_in_business, Some(0));
    }

    #[tokio::test]
    async fn list_order_is_preserved() {
        let (store, _db, _dir) = setup_test_db();
        let order = ["z", "a", "m", "b", "y"];
        store.upsert("owner-1", draft("Shop", &order)).await.unwrap();

        let loaded = store.find_by_owner("owner-1").await.unwrap().unwrap();
        assert_eq!(loaded.enhanced_profile.strengths, order);
    }

    #[tokio::test]
    async fn unknown_stored_category_is_a_storage_error() {
        let (store, db, _dir) = setup_test_db();
        store.upsert("owner-1", draft("Shop", &["a"])).await.unwrap();
        db.get_connection()
            .unwrap()
            .execute("UPDATE businesses SET category = 'Space Mining'", [])
            .unwrap();

        let result = store.find_by_owner("owner-1").await;
        assert!(matches!(result, Err(BizkitError::Storage(_))));
    }
}
