//! Construction-time errors.

use derive_more::{Display, Error};

/// Errors raised while building a strategy or wiring it into the middleware.
///
/// These are returned synchronously and are never recovered at request time.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConfigurationError {
    /// No verify callback was supplied.
    #[display("LocalAPIKeyStrategy requires a verify callback")]
    MissingVerify,

    /// The API key field path could not be parsed.
    #[display("invalid API key field '{path}': {reason}")]
    InvalidFieldPath {
        /// The rejected path
        path: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// `pass_req_to_callback` disagrees with the verify callback's signature.
    #[display("passReqToCallback is {pass_req_to_callback} but the verify callback signature does not match")]
    VerifyArityMismatch {
        /// The configured flag
        pass_req_to_callback: bool,
    },

    /// No strategy is registered under the requested name.
    #[display("unknown authentication strategy '{name}'")]
    UnknownStrategy {
        /// The requested name
        name: String,
    },
}
