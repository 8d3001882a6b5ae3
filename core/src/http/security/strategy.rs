//! Pluggable authentication strategies.
//!
//! A strategy turns an [`AuthRequest`] into exactly one [`AuthOutcome`]:
//! success, fail or error. The outcome is a value, so it can only be
//! delivered once. Hosts that prefer callbacks implement [`OutcomeSink`]
//! and hand a fresh sink to [`dispatch_outcome`] for every request.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::http::error::{BadRequestError, ConfigurationError};
use crate::http::security::request::AuthRequest;

/// Error produced by a verify callback. Passed through to the host as-is.
pub type VerifyError = Box<dyn std::error::Error + Send + Sync>;

/// What a verify callback decided about a credential.
#[derive(Debug, Clone, PartialEq)]
pub enum Verification<U> {
    /// The credential belongs to `user`.
    Verified { user: U, info: Option<Value> },
    /// The credential is not acceptable. Not an error.
    Rejected { info: Option<Value> },
}

impl<U> Verification<U> {
    /// Accepts the credential.
    pub fn verified(user: U) -> Self {
        Verification::Verified { user, info: None }
    }

    /// Accepts the credential with extra info for the host.
    pub fn verified_with_info(user: U, info: Value) -> Self {
        Verification::Verified {
            user,
            info: Some(info),
        }
    }

    /// Rejects the credential.
    pub fn rejected() -> Self {
        Verification::Rejected { info: None }
    }

    /// Rejects the credential with extra info (e.g. `{"message": "..."}`).
    pub fn rejected_with_info(info: Value) -> Self {
        Verification::Rejected { info: Some(info) }
    }
}

/// Result of a verify callback.
pub type VerifyResult<U> = Result<Verification<U>, VerifyError>;

/// Supplementary data carried by a fail outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum FailInfo {
    /// No credential could be extracted from the request.
    BadRequest(BadRequestError),
    /// The verify callback rejected the credential.
    Rejected(Option<Value>),
}

/// The single result of one authentication attempt.
#[derive(Debug)]
pub enum AuthOutcome<U> {
    Success { user: U, info: Option<Value> },
    Fail(FailInfo),
    Error(VerifyError),
}

impl<U> AuthOutcome<U> {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, AuthOutcome::Fail(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AuthOutcome::Error(_))
    }

    /// Delivers the outcome to exactly one of the sink's handlers.
    pub fn dispatch<S: OutcomeSink<U> + ?Sized>(self, sink: &mut S) {
        match self {
            AuthOutcome::Success { user, info } => sink.success(user, info),
            AuthOutcome::Fail(info) => sink.fail(info),
            AuthOutcome::Error(err) => sink.error(err),
        }
    }
}

impl<U> From<VerifyResult<U>> for AuthOutcome<U> {
    fn from(result: VerifyResult<U>) -> Self {
        match result {
            Ok(Verification::Verified { user, info }) => AuthOutcome::Success { user, info },
            Ok(Verification::Rejected { info }) => AuthOutcome::Fail(FailInfo::Rejected(info)),
            Err(err) => AuthOutcome::Error(err),
        }
    }
}

/// Host-side handlers for an authentication outcome.
///
/// Exactly one method is called per [`dispatch_outcome`].
pub trait OutcomeSink<U> {
    fn success(&mut self, user: U, info: Option<Value>);

    fn fail(&mut self, info: FailInfo);

    fn error(&mut self, err: VerifyError);
}

/// Per-call options for [`Strategy::authenticate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticateOptions {
    bad_request_message: Option<String>,
}

impl AuthenticateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the message of the missing-credential failure for this call.
    pub fn bad_request_message(mut self, message: impl Into<String>) -> Self {
        self.bad_request_message = Some(message.into());
        self
    }

    pub fn get_bad_request_message(&self) -> Option<&str> {
        self.bad_request_message.as_deref()
    }
}

/// A named, pluggable authentication unit.
pub trait Strategy<U>: Send + Sync {
    /// Name used by the host to select this strategy.
    fn name(&self) -> &str;

    /// Authenticates a request.
    ///
    /// Never blocks the caller and never panics on bad input; every failure
    /// after construction is reported through the returned outcome.
    fn authenticate<'a>(
        &'a self,
        req: &'a AuthRequest,
        options: &'a AuthenticateOptions,
    ) -> BoxFuture<'a, AuthOutcome<U>>;
}

/// Runs `strategy` and hands its outcome to `sink`.
pub async fn dispatch_outcome<U, S, K>(
    strategy: &S,
    req: &AuthRequest,
    options: &AuthenticateOptions,
    sink: &mut K,
) where
    S: Strategy<U> + ?Sized,
    K: OutcomeSink<U> + ?Sized,
{
    strategy.authenticate(req, options).await.dispatch(sink);
}

/// Strategies keyed by name.
///
/// # Example
/// ```ignore
/// let registry = StrategyRegistry::new().with(local_api_key_strategy);
/// let strategy = registry.get("localapikey").unwrap();
/// ```
pub struct StrategyRegistry<U> {
    strategies: HashMap<String, Arc<dyn Strategy<U>>>,
}

impl<U> StrategyRegistry<U> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        StrategyRegistry {
            strategies: HashMap::new(),
        }
    }

    /// Registers a strategy under its own name (builder pattern).
    pub fn with<S: Strategy<U> + 'static>(mut self, strategy: S) -> Self {
        self.use_strategy(strategy);
        self
    }

    /// Registers a strategy under its own name, replacing any previous one.
    pub fn use_strategy<S: Strategy<U> + 'static>(&mut self, strategy: S) {
        let name = strategy.name().to_string();
        self.use_named(name, Arc::new(strategy));
    }

    /// Registers a strategy under an explicit name.
    pub fn use_named(&mut self, name: impl Into<String>, strategy: Arc<dyn Strategy<U>>) {
        let name = name.into();
        if self.strategies.insert(name.clone(), strategy).is_some() {
            log::debug!("Replaced authentication strategy '{}'", name);
        }
    }

    /// Removes a strategy.
    pub fn unuse(&mut self, name: &str) -> Option<Arc<dyn Strategy<U>>> {
        self.strategies.remove(name)
    }

    /// Returns the strategy registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Strategy<U>>> {
        self.strategies.get(name).cloned()
    }

    /// Like [`get`](Self::get), but an unknown name is a configuration error.
    pub fn require(&self, name: &str) -> Result<Arc<dyn Strategy<U>>, ConfigurationError> {
        self.get(name)
            .ok_or_else(|| ConfigurationError::UnknownStrategy {
                name: name.to_string(),
            })
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl<U> Default for StrategyRegistry<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> Clone for StrategyRegistry<U> {
    fn clone(&self) -> Self {
        StrategyRegistry {
            strategies: self.strategies.clone(),
        }
    }
}
