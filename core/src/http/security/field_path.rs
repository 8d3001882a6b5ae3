//! Locating a credential inside parsed request parameters.
//!
//! A field path is either a flat key (`apikey`) or a bracketed accessor
//! (`user[apikey]`, `a[b][c]`). It is parsed once into segments and then
//! walked against the body or query mapping of each request.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::http::error::ConfigurationError;

/// Field name used when none is configured.
pub const DEFAULT_FIELD: &str = "apikey";

/// Parsed location of a credential.
///
/// # Example
/// ```
/// use actix_localapikey_core::http::security::FieldPath;
/// use serde_json::json;
///
/// let path = FieldPath::parse("user[apikey]").unwrap();
/// assert_eq!(path.segments(), ["user", "apikey"]);
///
/// let body = json!({ "user": { "apikey": "X" } });
/// assert_eq!(path.lookup(body.as_object()), Some("X".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a flat or bracketed field path.
    pub fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        let segments =
            split_segments(raw).map_err(|reason| ConfigurationError::InvalidFieldPath {
                path: raw.to_string(),
                reason,
            })?;
        Ok(FieldPath {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Returns the path as it was configured.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the ordered segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns true if the path descends into nested objects.
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Resolves the path against a parameter mapping.
    ///
    /// Only non-empty strings and numbers count as a credential. Anything
    /// else, including a missing mapping, resolves to `None`.
    pub fn lookup(&self, params: Option<&Map<String, Value>>) -> Option<String> {
        let (last, parents) = self.segments.split_last()?;
        let mut current = params?;
        for segment in parents {
            current = current.get(segment)?.as_object()?;
        }
        match current.get(last)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        FieldPath {
            raw: DEFAULT_FIELD.to_string(),
            segments: vec![DEFAULT_FIELD.to_string()],
        }
    }
}

impl FromStr for FieldPath {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Splits `head[seg][seg]` into its segments.
pub(crate) fn split_segments(raw: &str) -> Result<Vec<String>, &'static str> {
    let (head, mut rest) = match raw.find('[') {
        Some(i) => raw.split_at(i),
        None => (raw, ""),
    };
    if head.is_empty() {
        return Err("empty field name");
    }
    if head.contains(']') {
        return Err("unexpected ']'");
    }

    let mut segments = vec![head.to_string()];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[').ok_or("expected '['")?;
        let end = inner.find(']').ok_or("unclosed bracket")?;
        let segment = &inner[..end];
        if segment.is_empty() {
            return Err("empty segment");
        }
        if segment.contains('[') {
            return Err("nested '[' inside segment");
        }
        segments.push(segment.to_string());
        rest = &inner[end + 1..];
    }
    Ok(segments)
}
