//! Error types.

mod auth_error;
mod bad_request;
mod configuration_error;

pub use auth_error::AuthError;
pub use bad_request::{BadRequestError, DEFAULT_BAD_REQUEST_MESSAGE};
pub use configuration_error::ConfigurationError;
