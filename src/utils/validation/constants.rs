//! Constants used throughout the validation system


/// Character an email address must contain
pub const EMAIL_AT: char = '@';
/// Second character an email address must contain
pub const EMAIL_DOT: char = '.';
