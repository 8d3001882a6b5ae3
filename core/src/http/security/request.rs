//! Request model handed to strategies.

use actix_web::dev::ServiceRequest;
use serde_json::{Map, Value};

use crate::http::security::field_path::split_segments;

/// The parts of an HTTP request a strategy may read.
///
/// The host fills `body` and `query` with already-parsed parameters. Either
/// may be absent. `attributes` carries anything else the host wants a
/// verify callback to see (method, path, peer address, ...).
///
/// # Example
/// ```
/// use actix_localapikey_core::http::security::AuthRequest;
/// use serde_json::json;
///
/// let req = AuthRequest::new()
///     .body(json!({ "apikey": "sk_live_abc123" }))
///     .attribute("foo", "bar");
///
/// assert_eq!(req.get_body().unwrap()["apikey"], "sk_live_abc123");
/// assert!(req.get_query().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthRequest {
    body: Option<Map<String, Value>>,
    query: Option<Map<String, Value>>,
    attributes: Map<String, Value>,
}

impl AuthRequest {
    /// Creates a request with no body, no query and no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a request from an Actix service request.
    ///
    /// The query string is parsed with [`parse_params`]. The body is not
    /// read here; the middleware attaches it with [`AuthRequest::body`].
    pub fn from_service_request(req: &ServiceRequest) -> Self {
        let query = req.query_string();
        let mut request = AuthRequest::new()
            .attribute("method", req.method().as_str())
            .attribute("path", req.path());
        if !query.is_empty() {
            request.query = Some(parse_params(query));
        }
        if let Some(addr) = req.peer_addr() {
            request = request.attribute("peer_addr", addr.to_string());
        }
        request
    }

    /// Sets the parsed body. Values other than a JSON object leave it unset.
    pub fn body(mut self, body: Value) -> Self {
        self.body = into_params(body);
        self
    }

    /// Sets the parsed query. Values other than a JSON object leave it unset.
    pub fn query(mut self, query: Value) -> Self {
        self.query = into_params(query);
        self
    }

    /// Adds a host attribute.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the parsed body, if any.
    pub fn get_body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref()
    }

    /// Returns the parsed query, if any.
    pub fn get_query(&self) -> Option<&Map<String, Value>> {
        self.query.as_ref()
    }

    /// Returns a host attribute.
    pub fn get_attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns all host attributes.
    pub fn get_attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

/// Deepest bracket nesting [`parse_params`] builds.
pub const MAX_DEPTH: usize = 5;

/// Number of `&`-separated pairs [`parse_params`] reads; the rest are dropped.
pub const MAX_PARAMS: usize = 1000;

fn into_params(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        Value::Null => None,
        _ => {
            log::debug!("ignoring request parameters that are not an object");
            None
        }
    }
}

/// Parses `application/x-www-form-urlencoded` text into nested parameters.
///
/// Bracketed keys build nested objects: `user[apikey]=X` becomes
/// `{"user": {"apikey": "X"}}`. Keys and values are percent-decoded with
/// `+` read as a space. When a key repeats, the first value wins. Nesting
/// stops at [`MAX_DEPTH`] and at most [`MAX_PARAMS`] pairs are read.
///
/// # Example
/// ```
/// use actix_localapikey_core::http::security::parse_params;
///
/// let params = parse_params("user%5Bapikey%5D=a%2Bb&apikey=c+d");
/// assert_eq!(params["user"]["apikey"], "a+b");
/// assert_eq!(params["apikey"], "c d");
/// ```
pub fn parse_params(input: &str) -> Map<String, Value> {
    let mut params = Map::new();
    let pairs = input.split('&').filter(|p| !p.is_empty());
    for pair in pairs.take(MAX_PARAMS) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let (Some(key), Some(value)) = (decode(key), decode(value)) else {
            continue;
        };
        let segments = split_segments(&key).unwrap_or_else(|_| vec![key]);
        insert_nested(&mut params, &limit_depth(segments), value);
    }
    params
}

/// Collapses brackets past [`MAX_DEPTH`] into one literal key, so
/// `a[b][c][d][e][f][g][h]` nests down to `f` and keeps `[g][h]` as a key.
fn limit_depth(mut segments: Vec<String>) -> Vec<String> {
    if segments.len() > MAX_DEPTH + 1 {
        let rest: String = segments
            .drain(MAX_DEPTH + 1..)
            .map(|segment| format!("[{}]", segment))
            .collect();
        segments.push(rest);
    }
    segments
}

fn decode(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|s| s.into_owned())
}

fn insert_nested(params: &mut Map<String, Value>, segments: &[String], value: String) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        params.entry(first.clone()).or_insert(Value::String(value));
        return;
    }
    let child = params
        .entry(first.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(child) = child {
        insert_nested(child, rest, value);
    }
}
