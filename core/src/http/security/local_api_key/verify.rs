//! Verify callbacks.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::http::security::request::AuthRequest;
use crate::http::security::VerifyResult;

/// Future returned by a verify callback.
pub type VerifyFuture<U> = BoxFuture<'static, VerifyResult<U>>;

/// Caller-supplied validation of an extracted API key.
///
/// Two shapes exist: one that only sees the key, and one that also receives
/// a copy of the request (used with `passReqToCallback`).
///
/// # Example
/// ```
/// use actix_localapikey_core::http::security::local_api_key::Verify;
/// use actix_localapikey_core::http::security::Verification;
///
/// let verify: Verify<String> = Verify::new(|apikey: String| async move {
///     if apikey == "sk_live_abc123" {
///         Ok(Verification::verified("service-a".to_string()))
///     } else {
///         Ok(Verification::rejected())
///     }
/// });
/// assert!(!verify.accepts_request());
/// ```
pub struct Verify<U> {
    kind: VerifyKind<U>,
}

enum VerifyKind<U> {
    ApiKey(Arc<dyn Fn(String) -> VerifyFuture<U> + Send + Sync>),
    WithRequest(Arc<dyn Fn(AuthRequest, String) -> VerifyFuture<U> + Send + Sync>),
}

impl<U: 'static> Verify<U> {
    /// Wraps a callback that receives the API key only.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = VerifyResult<U>> + Send + 'static,
    {
        Verify {
            kind: VerifyKind::ApiKey(Arc::new(move |apikey: String| -> VerifyFuture<U> {
                Box::pin(f(apikey))
            })),
        }
    }

    /// Wraps a callback that receives the request followed by the API key.
    pub fn with_request<F, Fut>(f: F) -> Self
    where
        F: Fn(AuthRequest, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = VerifyResult<U>> + Send + 'static,
    {
        Verify {
            kind: VerifyKind::WithRequest(Arc::new(
                move |req: AuthRequest, apikey: String| -> VerifyFuture<U> {
                    Box::pin(f(req, apikey))
                },
            )),
        }
    }
}

impl<U> Verify<U> {
    /// Returns true if the callback expects the request as first argument.
    pub fn accepts_request(&self) -> bool {
        matches!(self.kind, VerifyKind::WithRequest(_))
    }

    pub(crate) fn call(&self, req: &AuthRequest, apikey: String) -> VerifyFuture<U> {
        match &self.kind {
            VerifyKind::ApiKey(f) => f(apikey),
            VerifyKind::WithRequest(f) => f(req.clone(), apikey),
        }
    }
}

impl<U> Clone for Verify<U> {
    fn clone(&self) -> Self {
        let kind = match &self.kind {
            VerifyKind::ApiKey(f) => VerifyKind::ApiKey(Arc::clone(f)),
            VerifyKind::WithRequest(f) => VerifyKind::WithRequest(Arc::clone(f)),
        };
        Verify { kind }
    }
}

impl<U> fmt::Debug for Verify<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verify")
            .field("accepts_request", &self.accepts_request())
            .finish()
    }
}
