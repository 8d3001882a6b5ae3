//! Strategy-based request authentication.
//!
//! # Module Structure
//!
//! - `strategy` - Outcome types, the `Strategy` trait and `StrategyRegistry`
//! - `request` - Request view handed to strategies (`AuthRequest`)
//! - `field_path` - Flat and bracket-nested parameter names
//! - `local_api_key` - API key strategy backed by a verify callback
//! - `middleware` - Actix Web middleware running a strategy (`StrategyTransform`)
//! - `extractor` - Actix Web extractors (`AuthenticatedUser`, `AuthInfo`)

mod extractor;
mod field_path;
mod request;
mod strategy;

pub mod local_api_key;
pub mod middleware;

// Re-exports for convenience
pub use extractor::{AuthInfo, AuthenticatedUser};
pub use field_path::{FieldPath, DEFAULT_FIELD};
pub use middleware::StrategyTransform;
pub use request::{parse_params, AuthRequest, MAX_DEPTH, MAX_PARAMS};
pub use strategy::{
    dispatch_outcome, AuthOutcome, AuthenticateOptions, FailInfo, OutcomeSink, Strategy,
    StrategyRegistry, Verification, VerifyError, VerifyResult,
};
