//! LocalAPIKey strategy implementation.

use futures_util::future::BoxFuture;
use log::{debug, warn};

use super::config::LocalApiKeyConfig;
use super::verify::Verify;
use crate::http::error::{BadRequestError, ConfigurationError, DEFAULT_BAD_REQUEST_MESSAGE};
use crate::http::security::{
    AuthOutcome, AuthRequest, AuthenticateOptions, FailInfo, FieldPath, Strategy,
};

/// Name under which the strategy is registered.
pub const STRATEGY_NAME: &str = "localapikey";

/// Strategy that reads an API key from the request body or query string.
///
/// The key is looked up in the body first and in the query second. A
/// request without a key fails with a [`BadRequestError`]; otherwise the
/// key goes to the verify callback and its answer becomes the outcome.
///
/// # Example
///
/// ```ignore
/// use actix_localapikey_core::http::security::local_api_key::{LocalApiKeyStrategy, Verify};
/// use actix_localapikey_core::http::security::Verification;
///
/// let strategy = LocalApiKeyStrategy::builder()
///     .apikey_field("user[apikey]")
///     .pass_req_to_callback(true)
///     .verify(Verify::with_request(|req, apikey| async move {
///         Ok(Verification::verified(lookup_user(&req, &apikey).await?))
///     }))
///     .build()?;
/// ```
pub struct LocalApiKeyStrategy<U> {
    field: FieldPath,
    config: LocalApiKeyConfig,
    verify: Verify<U>,
}

impl<U: Send + 'static> LocalApiKeyStrategy<U> {
    /// Creates a strategy with the default configuration.
    ///
    /// The request is forwarded to the callback if it was built with
    /// [`Verify::with_request`].
    pub fn new(verify: Verify<U>) -> Self {
        LocalApiKeyStrategy {
            field: FieldPath::default(),
            config: LocalApiKeyConfig::default().pass_req_to_callback(verify.accepts_request()),
            verify,
        }
    }

    /// Starts building a strategy.
    pub fn builder() -> LocalApiKeyStrategyBuilder<U> {
        LocalApiKeyStrategyBuilder {
            config: LocalApiKeyConfig::default(),
            verify: None,
        }
    }

    /// Returns the configuration this strategy was built with.
    pub fn get_config(&self) -> &LocalApiKeyConfig {
        &self.config
    }

    /// Returns the parsed field path.
    pub fn get_field(&self) -> &FieldPath {
        &self.field
    }

    /// Extracts the API key, body first, then query.
    pub fn extract_key(&self, req: &AuthRequest) -> Option<String> {
        self.field
            .lookup(req.get_body())
            .or_else(|| self.field.lookup(req.get_query()))
    }

    fn bad_request_message<'a>(&'a self, options: &'a AuthenticateOptions) -> &'a str {
        options
            .get_bad_request_message()
            .or_else(|| self.config.get_bad_request_message())
            .unwrap_or(DEFAULT_BAD_REQUEST_MESSAGE)
    }
}

impl<U: Send + 'static> Strategy<U> for LocalApiKeyStrategy<U> {
    fn name(&self) -> &str {
        STRATEGY_NAME
    }

    fn authenticate<'a>(
        &'a self,
        req: &'a AuthRequest,
        options: &'a AuthenticateOptions,
    ) -> BoxFuture<'a, AuthOutcome<U>> {
        Box::pin(async move {
            let Some(apikey) = self.extract_key(req) else {
                debug!("No API key in body or query field '{}'", self.field);
                let err = BadRequestError::new(self.bad_request_message(options));
                return AuthOutcome::Fail(FailInfo::BadRequest(err));
            };

            let outcome = AuthOutcome::from(self.verify.call(req, apikey).await);
            match &outcome {
                AuthOutcome::Success { .. } => debug!("API key verified"),
                AuthOutcome::Fail(_) => debug!("API key rejected"),
                AuthOutcome::Error(err) => warn!("API key verification failed: {}", err),
            }
            outcome
        })
    }
}

impl<U> Clone for LocalApiKeyStrategy<U> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            config: self.config.clone(),
            verify: self.verify.clone(),
        }
    }
}

/// Builder for [`LocalApiKeyStrategy`].
pub struct LocalApiKeyStrategyBuilder<U> {
    config: LocalApiKeyConfig,
    verify: Option<Verify<U>>,
}

impl<U: Send + 'static> LocalApiKeyStrategyBuilder<U> {
    /// Replaces the whole configuration.
    pub fn config(mut self, config: LocalApiKeyConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the field path (`"apikey"`, `"user[apikey]"`, ...).
    pub fn apikey_field(mut self, field: impl Into<String>) -> Self {
        self.config = self.config.apikey_field(field);
        self
    }

    /// Sets whether the verify callback receives the request.
    pub fn pass_req_to_callback(mut self, pass: bool) -> Self {
        self.config = self.config.pass_req_to_callback(pass);
        self
    }

    /// Sets the strategy-level message for missing credentials.
    pub fn bad_request_message(mut self, message: impl Into<String>) -> Self {
        self.config = self.config.bad_request_message(message);
        self
    }

    /// Sets the verify callback.
    pub fn verify(mut self, verify: Verify<U>) -> Self {
        self.verify = Some(verify);
        self
    }

    /// Builds the strategy.
    ///
    /// # Errors
    /// - [`ConfigurationError::MissingVerify`] without a verify callback
    /// - [`ConfigurationError::InvalidFieldPath`] for a malformed field path
    /// - [`ConfigurationError::VerifyArityMismatch`] when `pass_req_to_callback`
    ///   does not match the callback's shape
    pub fn build(self) -> Result<LocalApiKeyStrategy<U>, ConfigurationError> {
        let verify = self.verify.ok_or(ConfigurationError::MissingVerify)?;
        let field = FieldPath::parse(self.config.get_apikey_field())?;

        let pass_req_to_callback = self.config.should_pass_req_to_callback();
        if pass_req_to_callback != verify.accepts_request() {
            return Err(ConfigurationError::VerifyArityMismatch {
                pass_req_to_callback,
            });
        }

        Ok(LocalApiKeyStrategy {
            field,
            config: self.config,
            verify,
        })
    }
}
