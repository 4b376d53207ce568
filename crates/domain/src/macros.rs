//! Macro for implementing Display and FromStr for label enums
//!
//! This macro eliminates boilerplate for enums that have a fixed textual
//! label (business categories, backend selectors). It handles
//! case-insensitive parsing and consistent string representation.
//!
//! # Example
//!
//! ```rust
//! use bizkit_domain::impl_domain_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Tier {
//!     Free,
//!     Pro,
//! }
//!
//! impl_domain_label_conversions!(Tier {
//!     Free => "free",
//!     Pro => "Pro",
//! });
//!
//! assert_eq!("PRO".parse::<Tier>().unwrap(), Tier::Pro);
//! assert_eq!(Tier::Pro.to_string(), "Pro");
//! ```

/// Implements `as_str`, Display and FromStr for label enums
///
/// This macro generates:
/// - `as_str()`: the canonical label
/// - Display trait: writes the canonical label
/// - FromStr trait: parses trimmed, ASCII case-insensitive labels
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their canonical label
#[macro_export]
macro_rules! impl_domain_label_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical label for this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
