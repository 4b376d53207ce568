//! Shared fixtures for `bizkit-infra` integration tests.

#![allow(dead_code)]

pub mod contract;

use bizkit_domain::{BusinessCategory, BusinessDetails, EnhancedProfile, ProfileDraft, SocialMedia};

/// Details for the "Joe's Cafe" profile with an optional employee count.
pub fn cafe_details(employee_count: Option<u32>) -> BusinessDetails {
    BusinessDetails {
        name: "Joe's Cafe".into(),
        category: BusinessCategory::FoodAndBeverage,
        description: "Coffee shop".into(),
        location: "Austin, TX".into(),
        contact_number: "555-0100".into(),
        additional_info: Some("Live music on Fridays".into()),
        target_audience: None,
        years_in_business: Some(3),
        employee_count,
        website: Some("https://joes.example.com".into()),
        social_media: SocialMedia {
            instagram: Some("https://instagram.com/joescafe".into()),
            ..SocialMedia::default()
        },
    }
}

/// A generated-looking enhancement with full-length lists.
pub fn generated_enhancement() -> EnhancedProfile {
    EnhancedProfile {
        enhanced_description: "Joe's Cafe roasts its own beans and hosts live music.".into(),
        strengths: ["Fresh roasts", "Live music", "Late hours", "Friendly staff", "Local sourcing"]
            .map(String::from)
            .to_vec(),
        target_segments: ["Students", "Remote workers", "Music fans"].map(String::from).to_vec(),
        marketing_suggestions: ["Open-mic nights", "Loyalty cards", "Campus flyers"]
            .map(String::from)
            .to_vec(),
    }
}

pub fn draft(employee_count: Option<u32>) -> ProfileDraft {
    ProfileDraft { details: cafe_details(employee_count), enhanced_profile: generated_enhancement() }
}

/// Draft carrying the templated enhancement instead of the generated one.
pub fn template_draft(employee_count: Option<u32>) -> ProfileDraft {
    let details = cafe_details(employee_count);
    let enhanced_profile =
        EnhancedProfile::template(&details.name, details.category, &details.location, &details.description);
    ProfileDraft { details, enhanced_profile }
}
