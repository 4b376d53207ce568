//! Identity providers
//!
//! Implementations of `IdentityProvider` selected by `auth.mode`.

pub mod fixed;
pub mod jwt;

pub use fixed::FixedIdentityProvider;
pub use jwt::JwtIdentityProvider;
