//! Domain types and models

pub mod business;
pub mod fields;
pub mod identity;

pub use business::{
    BusinessCategory, BusinessDetails, BusinessProfile, EnhancedProfile, ProfileDraft,
    SocialMedia,
};
pub use fields::{NumberInput, ProfileFields, SocialMediaFields};
pub use identity::OwnerIdentity;
