//! Authentication middleware for Actix Web.
//!
//! Runs one strategy per request and turns its outcome into either a call to
//! the wrapped service or an error response.

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::error::PayloadError;
use actix_web::web::BytesMut;
use actix_web::{Error, HttpMessage};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use futures_util::StreamExt;
use serde_json::{Map, Value};

use crate::http::error::{AuthError, ConfigurationError};
use crate::http::security::extractor::AuthInfo;
use crate::http::security::{
    parse_params, AuthOutcome, AuthRequest, AuthenticateOptions, Strategy, StrategyRegistry,
};

/// Largest request body the middleware reads, in bytes.
pub const DEFAULT_BODY_LIMIT: usize = 256 * 1024;

/// Strategy middleware factory.
///
/// On success the user is stored in the request extensions (see
/// [`AuthenticatedUser`](crate::http::security::AuthenticatedUser)) together
/// with an [`AuthInfo`]. A fail outcome answers `400` or `401`, an error
/// outcome `500`.
///
/// # Example
/// ```ignore
/// App::new().wrap(
///     StrategyTransform::new(strategy)
///         .options(AuthenticateOptions::new().bad_request_message("API key required"))
/// )
/// ```
pub struct StrategyTransform<U> {
    strategy: Arc<dyn Strategy<U>>,
    options: AuthenticateOptions,
    body_limit: usize,
}

impl<U: 'static> StrategyTransform<U> {
    pub fn new<S: Strategy<U> + 'static>(strategy: S) -> Self {
        Self::shared(Arc::new(strategy))
    }

    pub fn shared(strategy: Arc<dyn Strategy<U>>) -> Self {
        StrategyTransform {
            strategy,
            options: AuthenticateOptions::default(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Selects a strategy by name.
    pub fn from_registry(
        registry: &StrategyRegistry<U>,
        name: &str,
    ) -> Result<Self, ConfigurationError> {
        registry.require(name).map(Self::shared)
    }

    /// Sets the per-call options passed to the strategy.
    pub fn options(mut self, options: AuthenticateOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the largest body read for credential lookup.
    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }
}

impl<S, B, U> Transform<S, ServiceRequest> for StrategyTransform<U>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    U: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = StrategyService<U, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(StrategyService {
            strategy: Arc::clone(&self.strategy),
            options: self.options.clone(),
            body_limit: self.body_limit,
            service: Rc::new(service),
        })
    }
}

/// Strategy middleware service.
pub struct StrategyService<U, S> {
    strategy: Arc<dyn Strategy<U>>,
    options: AuthenticateOptions,
    body_limit: usize,
    service: Rc<S>,
}

impl<U, S, B> Service<ServiceRequest> for StrategyService<U, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    U: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let strategy = Arc::clone(&self.strategy);
        let options = self.options.clone();
        let body_limit = self.body_limit;

        Box::pin(async move {
            // Step 1: Build the strategy's view of the request
            let body = match read_body(&mut req, body_limit).await {
                Ok(body) => body,
                Err(err) => return Ok(req.error_response(err).map_into_right_body()),
            };
            let mut auth_req = AuthRequest::from_service_request(&req);
            if let Some(body) = body {
                auth_req = auth_req.body(Value::Object(body));
            }

            // Step 2: Authenticate and act on the single outcome
            match strategy.authenticate(&auth_req, &options).await {
                AuthOutcome::Success { user, info } => {
                    req.extensions_mut().insert(user);
                    req.extensions_mut().insert(AuthInfo::new(info));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                AuthOutcome::Fail(info) => {
                    let err = AuthError::from(info);
                    Ok(req.error_response(err).map_into_right_body())
                }
                AuthOutcome::Error(err) => {
                    log::error!("Strategy '{}' failed: {}", strategy.name(), err);
                    Ok(req.error_response(AuthError::Internal).map_into_right_body())
                }
            }
        })
    }
}

/// Reads and parses a JSON or form body, then puts the bytes back for the
/// handler. Other content types are left alone.
async fn read_body(
    req: &mut ServiceRequest,
    limit: usize,
) -> Result<Option<Map<String, Value>>, Error> {
    let json = match req.mime_type() {
        Ok(Some(mime)) if mime.type_().as_str().eq_ignore_ascii_case("application") => {
            let subtype = mime.subtype();
            let suffix = mime.suffix();
            if subtype.as_str().eq_ignore_ascii_case("json")
                || suffix.is_some_and(|s| s.as_str().eq_ignore_ascii_case("json"))
            {
                true
            } else if subtype.as_str().eq_ignore_ascii_case("x-www-form-urlencoded") {
                false
            } else {
                return Ok(None);
            }
        }
        _ => return Ok(None),
    };

    let mut payload = req.take_payload();
    let mut bytes = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if bytes.len() + chunk.len() > limit {
            return Err(PayloadError::Overflow.into());
        }
        bytes.extend_from_slice(&chunk);
    }
    let bytes = bytes.freeze();

    let params = if json {
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Some(map),
            _ => {
                log::debug!("Request body is not a JSON object, ignoring it");
                None
            }
        }
    } else {
        std::str::from_utf8(&bytes).ok().map(parse_params)
    };

    req.set_payload(Payload::from(bytes));
    Ok(params)
}
