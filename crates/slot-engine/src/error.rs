//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid day window: start hour {start_hour} must be before end hour {end_hour} (both within 0..=24)")]
    InvalidWindow { start_hour: u32, end_hour: u32 },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date range: {first} is after {last}")]
    InvalidRange { first: String, last: String },

    #[error("Invalid slot duration: {0} minutes (must be positive)")]
    InvalidSlotDuration(i64),

    #[error("Local time does not exist in this timezone: {0}")]
    NonexistentLocalTime(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
