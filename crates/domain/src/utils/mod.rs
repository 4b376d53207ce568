//! Domain utilities

pub mod time;

pub use time::{advance_timestamp, duration_millis, now_millis, truncate_to_millis};
