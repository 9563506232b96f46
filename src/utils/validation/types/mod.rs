//! Type definitions for the validation system

mod email_input;
mod text_input;

// Re-export commonly used types and functions
pub use email_input::EmailInput;
pub use text_input::TextInput;
