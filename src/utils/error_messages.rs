//! Represents all possible errors in the application

use thiserror::Error;

pub const MISSING_FIELDS: &str = "Please fill in all fields.";

pub const INVALID_EMAIL: &str = "Please enter a valid email address.";

pub const RENDER_ERROR: &str = "Internal Server Error";

/// Failure of one step of a submission. Each variant maps to one banner level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// User-correctable, shown as a warning while the form stays open.
    #[error("{0}")]
    Validation(String),

    /// Store client initialization or insert failure. Aborts the submission.
    #[error("{0}")]
    Persistence(String),

    /// Email transport failure or non-accepted response. The record is kept.
    #[error("{0}")]
    Notification(String),
}

/// Startup configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Please set {} in the environment or in a `.env` file.", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
