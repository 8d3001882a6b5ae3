//! Missing credential error.

use derive_more::{Display, Error};

/// Message used when neither the call nor the strategy supplies one.
pub const DEFAULT_BAD_REQUEST_MESSAGE: &str = "Missing API Key";

/// Raised when a request carries no extractable credential.
///
/// Strategies report it through the fail outcome rather than returning it,
/// so the host decides how the rejection is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{message}")]
pub struct BadRequestError {
    message: String,
}

impl BadRequestError {
    /// Creates a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        BadRequestError {
            message: message.into(),
        }
    }

    /// Returns the human-readable message.
    pub fn get_message(&self) -> &str {
        &self.message
    }
}

impl Default for BadRequestError {
    fn default() -> Self {
        Self::new(DEFAULT_BAD_REQUEST_MESSAGE)
    }
}
