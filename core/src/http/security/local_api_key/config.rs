//! LocalAPIKey strategy configuration.

use serde::Deserialize;

use crate::http::security::field_path::DEFAULT_FIELD;

/// Configuration for [`LocalApiKeyStrategy`](super::LocalApiKeyStrategy).
///
/// Can be built in code or deserialized from JSON using the camelCase keys
/// `apikeyField`, `passReqToCallback` and `badRequestMessage`:
///
/// ```
/// use actix_localapikey_core::http::security::local_api_key::LocalApiKeyConfig;
///
/// let config = LocalApiKeyConfig::from_json(r#"{"apikeyField": "user[apikey]"}"#).unwrap();
/// assert_eq!(config.get_apikey_field(), "user[apikey]");
/// assert!(!config.should_pass_req_to_callback());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalApiKeyConfig {
    /// Where to find the key in the body or query.
    apikey_field: String,
    /// Whether the verify callback receives the request.
    pass_req_to_callback: bool,
    /// Strategy-level message for missing credentials.
    bad_request_message: Option<String>,
}

impl Default for LocalApiKeyConfig {
    fn default() -> Self {
        Self {
            apikey_field: DEFAULT_FIELD.to_string(),
            pass_req_to_callback: false,
            bad_request_message: None,
        }
    }
}

impl LocalApiKeyConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration object. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the field path, e.g. `"apikey"` or `"user[apikey]"`.
    pub fn apikey_field(mut self, field: impl Into<String>) -> Self {
        self.apikey_field = field.into();
        self
    }

    /// Sets whether the verify callback receives the request.
    pub fn pass_req_to_callback(mut self, pass: bool) -> Self {
        self.pass_req_to_callback = pass;
        self
    }

    /// Sets the strategy-level message for missing credentials.
    pub fn bad_request_message(mut self, message: impl Into<String>) -> Self {
        self.bad_request_message = Some(message.into());
        self
    }

    pub fn get_apikey_field(&self) -> &str {
        &self.apikey_field
    }

    pub fn should_pass_req_to_callback(&self) -> bool {
        self.pass_req_to_callback
    }

    pub fn get_bad_request_message(&self) -> Option<&str> {
        self.bad_request_message.as_deref()
    }
}
