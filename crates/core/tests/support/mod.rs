//! Shared test helpers for `bizkit-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that
//! service and enhancer tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod generators;
pub mod stores;

use bizkit_domain::ProfileFields;

/// Minimal valid input for the "Joe's Cafe" profile.
pub fn joes_cafe() -> ProfileFields {
    ProfileFields {
        name: Some("Joe's Cafe".into()),
        category: Some("Food & Beverage".into()),
        description: Some("Coffee shop".into()),
        location: Some("Austin, TX".into()),
        contact_number: Some("555-0100".into()),
        ..ProfileFields::default()
    }
}

/// A well-formed generator reply.
pub const GENERATED_REPLY: &str = r#"{
    "enhancedDescription": "Joe's Cafe roasts its own beans and hosts live music.",
    "strengths": ["Fresh roasts", "Live music", "Late hours", "Friendly staff", "Local sourcing"],
    "targetSegments": ["Students", "Remote workers", "Music fans"],
    "marketingSuggestions": ["Open-mic nights", "Loyalty cards", "Campus flyers"]
}"#;
