//! Provides a validated, required text field representation.
//!
//! The only rule is that the field must not be empty. Content is kept exactly
//! as submitted: no trimming and no normalization.

use std::fmt;

use crate::utils::error_messages::{IntakeError, MISSING_FIELDS};

/// A required text field that is guaranteed to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextInput {
    text_content: String,
}

impl TextInput {
    /// Creates a new `TextInput`, rejecting empty content.
    ///
    /// # Example
    /// ```ignore
    /// let first_name = TextInput::new_required("John").unwrap();
    /// assert!(TextInput::new_required("").is_err());
    /// ```
    pub fn new_required(content: &str) -> Result<Self, IntakeError> {
        if content.is_empty() {
            return Err(IntakeError::Validation(MISSING_FIELDS.to_string()));
        }

        Ok(Self {
            text_content: content.to_string(),
        })
    }

    /// Returns the validated content as a string slice
    pub fn as_str(&self) -> &str {
        &self.text_content
    }
}

/// Implements Display to allow printing the text content
impl fmt::Display for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text_content)
    }
}

impl AsRef<str> for TextInput {
    fn as_ref(&self) -> &str {
        &self.text_content
    }
}
