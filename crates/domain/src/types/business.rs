//! Business profile types
//!
//! One [`BusinessProfile`] exists per owner. The JSON shape is camelCase and
//! absent optional values are omitted rather than written as `""` or `0`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    FALLBACK_MARKETING_SUGGESTIONS, FALLBACK_STRENGTHS, FALLBACK_TARGET_SEGMENTS,
};
use crate::utils::time::advance_timestamp;

/// Business categories offered by the profile form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessCategory {
    Retail,
    #[serde(rename = "Food & Beverage")]
    FoodAndBeverage,
    #[serde(rename = "Health & Wellness")]
    HealthAndWellness,
    #[serde(rename = "Professional Services")]
    ProfessionalServices,
    Technology,
    Education,
    #[serde(rename = "Home Services")]
    HomeServices,
    #[serde(rename = "Beauty & Personal Care")]
    BeautyAndPersonalCare,
    Automotive,
    Entertainment,
    #[serde(rename = "Travel & Hospitality")]
    TravelAndHospitality,
    Manufacturing,
    Construction,
    #[serde(rename = "Real Estate")]
    RealEstate,
    #[serde(rename = "Financial Services")]
    FinancialServices,
    Other,
}

crate::impl_domain_label_conversions!(BusinessCategory {
    Retail => "Retail",
    FoodAndBeverage => "Food & Beverage",
    HealthAndWellness => "Health & Wellness",
    ProfessionalServices => "Professional Services",
    Technology => "Technology",
    Education => "Education",
    HomeServices => "Home Services",
    BeautyAndPersonalCare => "Beauty & Personal Care",
    Automotive => "Automotive",
    Entertainment => "Entertainment",
    TravelAndHospitality => "Travel & Hospitality",
    Manufacturing => "Manufacturing",
    Construction => "Construction",
    RealEstate => "Real Estate",
    FinancialServices => "Financial Services",
    Other => "Other",
});

impl BusinessCategory {
    /// Every category, in form order.
    pub const ALL: [BusinessCategory; 16] = [
        Self::Retail,
        Self::FoodAndBeverage,
        Self::HealthAndWellness,
        Self::ProfessionalServices,
        Self::Technology,
        Self::Education,
        Self::HomeServices,
        Self::BeautyAndPersonalCare,
        Self::Automotive,
        Self::Entertainment,
        Self::TravelAndHospitality,
        Self::Manufacturing,
        Self::Construction,
        Self::RealEstate,
        Self::FinancialServices,
        Self::Other,
    ];
}

/// Social media profile links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl SocialMedia {
    pub fn is_empty(&self) -> bool {
        self.facebook.is_none()
            && self.instagram.is_none()
            && self.twitter.is_none()
            && self.linkedin.is_none()
    }
}

/// Validated, caller-supplied business details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDetails {
    pub name: String,
    pub category: BusinessCategory,
    pub description: String,
    pub location: String,
    pub contact_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_in_business: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "SocialMedia::is_empty")]
    pub social_media: SocialMedia,
}

/// Structured enhancement attached to every stored profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedProfile {
    pub enhanced_description: String,
    pub strengths: Vec<String>,
    pub target_segments: Vec<String>,
    pub marketing_suggestions: Vec<String>,
}

impl EnhancedProfile {
    /// Deterministic enhancement used when no generated one is available.
    ///
    /// A period is appended to `description` when it does not already end in
    /// terminal punctuation.
    pub fn template(
        name: &str,
        category: BusinessCategory,
        location: &str,
        description: &str,
    ) -> Self {
        let description = description.trim();
        let terminator = match description.chars().last() {
            Some('.' | '!' | '?') | None => "",
            Some(_) => ".",
        };

        Self {
            enhanced_description: format!(
                "{name} is a {category} business located in {location}. {description}{terminator}"
            ),
            strengths: FALLBACK_STRENGTHS.iter().map(|s| (*s).to_string()).collect(),
            target_segments: FALLBACK_TARGET_SEGMENTS.iter().map(|s| (*s).to_string()).collect(),
            marketing_suggestions: FALLBACK_MARKETING_SUGGESTIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

/// Everything a store needs to write one profile, minus identity and
/// timestamps which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub details: BusinessDetails,
    pub enhanced_profile: EnhancedProfile,
}

/// Persisted business profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub id: String,
    pub owner_id: String,
    #[serde(flatten)]
    pub details: BusinessDetails,
    pub enhanced_profile: EnhancedProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessProfile {
    /// Build a brand new record for `owner_id` with a fresh id.
    pub fn create(owner_id: &str, draft: ProfileDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            details: draft.details,
            enhanced_profile: draft.enhanced_profile,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field, keeping `id`, `owner_id` and `created_at`.
    pub fn revise(&self, draft: ProfileDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id.clone(),
            owner_id: self.owner_id.clone(),
            details: draft.details,
            enhanced_profile: draft.enhanced_profile,
            created_at: self.created_at,
            updated_at: advance_timestamp(self.updated_at, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn details() -> BusinessDetails {
        BusinessDetails {
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
        }
    }

    fn draft() -> ProfileDraft {
        let d = details();
        let enhanced_profile =
            EnhancedProfile::template(&d.name, d.category, &d.location, &d.description);
        ProfileDraft { details: d, enhanced_profile }
    }

    #[test]
    fn template_matches_expected_sentence() {
        let profile = EnhancedProfile::template(
            "Joe's Cafe",
            BusinessCategory::FoodAndBeverage,
            "Austin, TX",
            "Coffee shop",
        );
        assert_eq!(
            profile.enhanced_description,
            "Joe's Cafe is a Food & Beverage business located in Austin, TX. Coffee shop."
        );
        assert_eq!(profile.strengths.len(), 5);
        assert_eq!(profile.target_segments.len(), 3);
        assert_eq!(profile.marketing_suggestions.len(), 3);
    }

    #[test]
    fn template_keeps_existing_punctuation() {
        let profile =
            EnhancedProfile::template("Fix-It", BusinessCategory::HomeServices, "Reno", "We fix!");
        assert!(profile.enhanced_description.ends_with("We fix!"));
    }

    #[test]
    fn category_serializes_with_canonical_label() {
        let json = serde_json::to_value(BusinessCategory::BeautyAndPersonalCare).unwrap();
        assert_eq!(json, "Beauty & Personal Care");
        assert_eq!(
            "beauty & personal care".parse::<BusinessCategory>().unwrap(),
            BusinessCategory::BeautyAndPersonalCare
        );
    }

    #[test]
    fn absent_optionals_are_omitted_from_json() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let profile = BusinessProfile::create("owner-1", draft(), now);
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["ownerId"], "owner-1");
        assert_eq!(json["contactNumber"], "555-0100");
        assert!(json.get("employeeCount").is_none());
        assert!(json.get("website").is_none());
        assert!(json.get("socialMedia").is_none());
        assert_eq!(json["enhancedProfile"]["strengths"].as_array().unwrap().len(), 5);

        let back: BusinessProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn revise_preserves_identity_and_advances_updated_at() {
        let created = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let original = BusinessProfile::create("owner-1", draft(), created);

        let mut next = draft();
        next.details.employee_count = Some(4);
        let revised = original.revise(next, created);

        assert_eq!(revised.id, original.id);
        assert_eq!(revised.created_at, original.created_at);
        assert!(revised.updated_at > original.updated_at);
        assert_eq!(revised.details.employee_count, Some(4));
    }
}
