//! Represents a coarsely validated email address.
//!
//! The check is a heuristic, not a grammar: the address must be non-empty and
//! contain both an `@` and a `.`. Nothing stricter is enforced so that every
//! address accepted before keeps being accepted.

use std::fmt;

use crate::utils::error_messages::{IntakeError, INVALID_EMAIL, MISSING_FIELDS};
use crate::utils::validation::{EMAIL_AT, EMAIL_DOT};

/// An email address that passed the `@` / `.` heuristic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmailInput {
    email: String,
}

impl EmailInput {
    /// Creates a new `EmailInput` after checking the provided string.
    ///
    /// # Returns
    /// * `Ok(EmailInput)` if the address is non-empty and contains `@` and `.`
    /// * `Err(IntakeError::Validation)` otherwise
    pub fn new(email: &str) -> Result<Self, IntakeError> {
        if email.is_empty() {
            return Err(IntakeError::Validation(MISSING_FIELDS.to_string()));
        }

        if !email.contains(EMAIL_AT) || !email.contains(EMAIL_DOT) {
            return Err(IntakeError::Validation(INVALID_EMAIL.to_string()));
        }

        Ok(Self {
            email: email.to_string(),
        })
    }

    /// Returns a string slice of the validated email address
    pub fn as_str(&self) -> &str {
        &self.email
    }
}

impl fmt::Display for EmailInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

/// Allows using EmailInput wherever a string reference is needed
impl AsRef<str> for EmailInput {
    fn as_ref(&self) -> &str {
        &self.email
    }
}
