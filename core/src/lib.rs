//! # Actix LocalAPIKey
//!
//! API key authentication strategy for Actix Web.
//!
//! The [`LocalApiKeyStrategy`](http::security::local_api_key::LocalApiKeyStrategy)
//! reads an API key from the parsed request body or query string and hands it
//! to a caller-supplied verify function. The result is reported as a single
//! [`AuthOutcome`](http::security::AuthOutcome): success, fail or error.
//!
//! ## Example
//!
//! ```rust,ignore
//! use actix_localapikey_core::http::security::local_api_key::{LocalApiKeyStrategy, Verify};
//! use actix_localapikey_core::http::security::{Verification, StrategyTransform};
//!
//! let strategy = LocalApiKeyStrategy::builder()
//!     .apikey_field("user[apikey]")
//!     .verify(Verify::new(|apikey: String| async move {
//!         if apikey == "sk_live_abc123" {
//!             Ok(Verification::verified(apikey))
//!         } else {
//!             Ok(Verification::rejected())
//!         }
//!     }))
//!     .build()?;
//!
//! App::new().wrap(StrategyTransform::new(strategy))
//! ```
//!
//! ## Modules
//!
//! - [`http::security`] - Strategies, request model and middleware
//! - [`http::error`] - Error types

pub mod http;

pub use http::error::BadRequestError;

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
