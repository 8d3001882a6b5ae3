//! Extractors for accessing the authentication result in handlers.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde_json::Value;

use crate::http::error::AuthError;

/// Extractor for the user produced by a successful strategy.
///
/// # Usage
/// ```ignore
/// use actix_localapikey_core::http::security::AuthenticatedUser;
///
/// async fn handler(client: AuthenticatedUser<Client>) -> impl Responder {
///     format!("Hello, {}!", client.name)
/// }
/// ```
///
/// # Errors
/// Returns `401 Unauthorized` if no user of type `U` was stored.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser<U>(U);

impl<U> AuthenticatedUser<U> {
    /// Creates a new AuthenticatedUser wrapper.
    pub fn new(user: U) -> Self {
        AuthenticatedUser(user)
    }

    /// Returns the inner user.
    pub fn into_inner(self) -> U {
        self.0
    }
}

impl<U> Deref for AuthenticatedUser<U> {
    type Target = U;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<U: Clone + 'static> FromRequest for AuthenticatedUser<U> {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<U>().cloned() {
            Some(user) => ready(Ok(AuthenticatedUser(user))),
            None => ready(Err(AuthError::Unauthorized {
                message: "unauthorized".to_string(),
            })),
        }
    }
}

/// Supplementary info reported alongside a successful authentication.
///
/// Always extractable; empty when the strategy gave no info or did not run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthInfo(Option<Value>);

impl AuthInfo {
    pub fn new(info: Option<Value>) -> Self {
        AuthInfo(info)
    }

    /// Returns the inner value.
    pub fn into_inner(self) -> Option<Value> {
        self.0
    }

    /// Returns the `message` entry, if the info is an object carrying one.
    pub fn message(&self) -> Option<&str> {
        self.0.as_ref()?.get("message")?.as_str()
    }
}

impl Deref for AuthInfo {
    type Target = Option<Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthInfo {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let info = req.extensions().get::<AuthInfo>().cloned().unwrap_or_default();
        ready(Ok(info))
    }
}
