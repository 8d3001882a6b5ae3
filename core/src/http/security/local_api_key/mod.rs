//! LocalAPIKey authentication strategy.
//!
//! # Overview
//!
//! The strategy reads an API key from the already-parsed request parameters
//! and delegates its validation to a verify callback supplied by the
//! application. It does not store, hash or sign keys.
//!
//! # Key Locations
//!
//! The key is looked up with a [`FieldPath`](crate::http::security::FieldPath):
//! - **Flat field** (default): `apikey`
//! - **Nested field**: `user[apikey]` reads `{"user": {"apikey": ...}}`
//!
//! The request body is checked first, then the query string.
//!
//! # Outcomes
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | No key in body or query | `Fail(BadRequest)` |
//! | Callback returns `Verified` | `Success { user, info }` |
//! | Callback returns `Rejected` | `Fail(Rejected(info))` |
//! | Callback returns `Err` | `Error(err)`, unchanged |
//!
//! # Usage
//!
//! ## Basic Setup
//!
//! ```ignore
//! use actix_localapikey_core::http::security::local_api_key::{LocalApiKeyStrategy, Verify};
//! use actix_localapikey_core::http::security::Verification;
//!
//! let strategy = LocalApiKeyStrategy::new(Verify::new(|apikey: String| async move {
//!     match find_client(&apikey).await? {
//!         Some(client) => Ok(Verification::verified(client)),
//!         None => Ok(Verification::rejected_with_info(json!({ "message": "Unknown API key" }))),
//!     }
//! }));
//! ```
//!
//! ## Nested Field and Request Access
//!
//! ```ignore
//! let strategy = LocalApiKeyStrategy::builder()
//!     .apikey_field("user[apikey]")
//!     .pass_req_to_callback(true)
//!     .verify(Verify::with_request(|req, apikey| async move {
//!         let path = req.get_attribute("path").cloned();
//!         Ok(Verification::verified(Client { apikey, path }))
//!     }))
//!     .build()?;
//! ```
//!
//! ## With Middleware
//!
//! ```ignore
//! App::new()
//!     .wrap(StrategyTransform::new(strategy))
//!     .service(my_api_endpoint)
//! ```
//!
//! # Security Considerations
//!
//! 1. **Use HTTPS** - API keys are transmitted in plaintext
//! 2. **Prefer the body** - query strings end up in access logs

mod config;
mod strategy;
mod verify;

pub use config::LocalApiKeyConfig;
pub use strategy::{LocalApiKeyStrategy, LocalApiKeyStrategyBuilder, STRATEGY_NAME};
pub use verify::{Verify, VerifyFuture};
