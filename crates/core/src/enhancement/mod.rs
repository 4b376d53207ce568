//! Profile enhancement through an external text generator

pub mod enhancer;
pub mod ports;
pub mod prompt;

pub use enhancer::{EnhancementOutcome, EnhancementRequest, EnhancementSource, ProfileEnhancer};
