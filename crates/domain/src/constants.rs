//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Enhancement list sizes requested from the text generator
pub const STRENGTHS_TARGET_LEN: usize = 5;
pub const TARGET_SEGMENTS_TARGET_LEN: usize = 3;
pub const MARKETING_SUGGESTIONS_TARGET_LEN: usize = 3;

// Templated enhancement used when no generated one is available
pub const FALLBACK_STRENGTHS: [&str; STRENGTHS_TARGET_LEN] = [
    "Quality products/services",
    "Customer-focused approach",
    "Experienced team",
    "Competitive pricing",
    "Innovative solutions",
];
pub const FALLBACK_TARGET_SEGMENTS: [&str; TARGET_SEGMENTS_TARGET_LEN] =
    ["Local customers", "Online shoppers", "Business clients"];
pub const FALLBACK_MARKETING_SUGGESTIONS: [&str; MARKETING_SUGGESTIONS_TARGET_LEN] = [
    "Develop a strong social media presence",
    "Create targeted email marketing campaigns",
    "Implement a customer referral program",
];

// Enhancement call bounds (seconds)
pub const DEFAULT_ENHANCEMENT_TIMEOUT_SECS: u64 = 20;
pub const MIN_ENHANCEMENT_TIMEOUT_SECS: u64 = 1;
pub const MAX_ENHANCEMENT_TIMEOUT_SECS: u64 = 120;

// Free-text limits applied during validation
pub const MAX_SHORT_FIELD_LENGTH: usize = 200;
pub const MAX_LONG_FIELD_LENGTH: usize = 5_000;
