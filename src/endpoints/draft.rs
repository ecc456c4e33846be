//! Operator input and its validation into an [`Endpoint`].
//!
//! # Responsibilities
//! - Normalize method and path as typed by the operator
//! - Apply defaults (GET, 200, no delay, success body)
//! - Reject bodies that are not JSON and headers HTTP cannot carry
//! - Assign the endpoint id

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::http::{HeaderName, HeaderValue, Method};
use serde_json::value::RawValue;
use thiserror::Error;
use uuid::Uuid;

use crate::endpoints::model::Endpoint;

/// Body used when the operator leaves the response empty.
pub const DEFAULT_BODY: &str = r#"{"message": "success"}"#;

/// Reasons an endpoint is refused before it reaches a Configuration.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("path is required")]
    MissingPath,

    #[error("invalid method: {0}")]
    InvalidMethod(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid delay: {0}")]
    InvalidDelay(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("duplicate endpoint id: {0}")]
    DuplicateId(String),
}

/// Raw, unvalidated endpoint fields as entered by the operator.
#[derive(Debug, Clone, Default)]
pub struct EndpointDraft {
    pub method: String,
    pub path: String,
    pub status: String,
    pub delay: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl EndpointDraft {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn delay(mut self, delay: impl Into<String>) -> Self {
        self.delay = delay.into();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Validate the draft and produce an endpoint with a fresh id.
    pub fn into_endpoint(self) -> Result<Endpoint, EndpointError> {
        let method = normalize_method(&self.method)?;
        let path = normalize_path(&self.path)?;
        let status_code = parse_status(&self.status);

        let delay = self.delay.trim();
        let delay_ms = if delay.is_empty() {
            0
        } else {
            delay
                .parse::<u64>()
                .map_err(|_| EndpointError::InvalidDelay(delay.to_string()))?
        };

        let mut headers = BTreeMap::new();
        for (name, value) in self.headers {
            let name = name.trim().to_string();
            let value = value.trim().to_string();
            if HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Err(EndpointError::InvalidHeader(name));
            }
            if HeaderValue::from_str(&value).is_err() {
                return Err(EndpointError::InvalidHeader(format!("{}: {}", name, value)));
            }
            headers.insert(name, value);
        }

        let body = self.body.trim();
        let body = if body.is_empty() { DEFAULT_BODY } else { body };
        serde_json::from_str::<&RawValue>(body)?;

        Ok(Endpoint {
            id: Uuid::new_v4().to_string(),
            method,
            path,
            status_code,
            headers,
            delay_ms,
            body: Bytes::from(body.to_owned()),
        })
    }
}

fn normalize_method(raw: &str) -> Result<String, EndpointError> {
    let method = raw.trim().to_uppercase();
    if method.is_empty() {
        return Ok(Method::GET.to_string());
    }
    Method::from_bytes(method.as_bytes())
        .map(|m| m.to_string())
        .map_err(|_| EndpointError::InvalidMethod(method))
}

fn normalize_path(raw: &str) -> Result<String, EndpointError> {
    let path = raw.trim();
    if path.is_empty() {
        return Err(EndpointError::MissingPath);
    }
    // Query and fragment never reach the path a request is matched on.
    if path.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
        return Err(EndpointError::InvalidPath(path.to_string()));
    }
    if path.starts_with('/') {
        Ok(path.to_string())
    } else {
        Ok(format!("/{}", path))
    }
}

/// Unset or unparseable status codes silently become 200.
fn parse_status(raw: &str) -> u16 {
    raw.trim().parse().unwrap_or(200)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let endpoint = EndpointDraft::new("", "users").into_endpoint().unwrap();
        assert_eq!(endpoint.method, "GET");
        assert_eq!(endpoint.path, "/users");
        assert_eq!(endpoint.status_code, 200);
        assert_eq!(endpoint.delay_ms, 0);
        assert_eq!(&endpoint.body[..], DEFAULT_BODY.as_bytes());
        assert!(Uuid::parse_str(&endpoint.id).is_ok());
    }

    #[test]
    fn test_method_uppercased() {
        let endpoint = EndpointDraft::new("post", "/items").into_endpoint().unwrap();
        assert_eq!(endpoint.method, "POST");
    }

    #[test]
    fn test_unparseable_status_defaults_to_ok() {
        let endpoint = EndpointDraft::new("GET", "/x")
            .status("abc")
            .into_endpoint()
            .unwrap();
        assert_eq!(endpoint.status_code, 200);

        let endpoint = EndpointDraft::new("GET", "/x")
            .status("418")
            .into_endpoint()
            .unwrap();
        assert_eq!(endpoint.status_code, 418);
    }

    #[test]
    fn test_missing_path_rejected() {
        let err = EndpointDraft::new("GET", "  ").into_endpoint().unwrap_err();
        assert!(matches!(err, EndpointError::MissingPath));
        assert_eq!(err.to_string(), "path is required");
    }

    #[test]
    fn test_unreachable_paths_rejected() {
        for path in ["/a b", "/search?q=1", "/page#top"] {
            let err = EndpointDraft::new("GET", path).into_endpoint().unwrap_err();
            assert!(matches!(err, EndpointError::InvalidPath(_)), "path {}", path);
        }

        let endpoint = EndpointDraft::new("GET", "/café").into_endpoint().unwrap();
        assert_eq!(endpoint.path, "/café");
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = EndpointDraft::new("GET", "/x")
            .body("{not json")
            .into_endpoint()
            .unwrap_err();
        assert!(matches!(err, EndpointError::InvalidJson(_)));
        assert!(err.to_string().starts_with("invalid JSON"));
    }

    #[test]
    fn test_body_kept_verbatim() {
        let endpoint = EndpointDraft::new("GET", "/x")
            .body(r#"{"a":  1}"#)
            .into_endpoint()
            .unwrap();
        assert_eq!(&endpoint.body[..], br#"{"a":  1}"#);
    }

    #[test]
    fn test_headers_and_delay() {
        let endpoint = EndpointDraft::new("GET", "/x")
            .delay("50")
            .header("X-Env", "dev")
            .into_endpoint()
            .unwrap();
        assert_eq!(endpoint.delay_ms, 50);
        assert_eq!(endpoint.headers.get("X-Env").map(String::as_str), Some("dev"));

        let err = EndpointDraft::new("GET", "/x")
            .header("bad header", "v")
            .into_endpoint()
            .unwrap_err();
        assert!(matches!(err, EndpointError::InvalidHeader(_)));

        let err = EndpointDraft::new("GET", "/x")
            .delay("-5")
            .into_endpoint()
            .unwrap_err();
        assert!(matches!(err, EndpointError::InvalidDelay(_)));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = EndpointDraft::new("GET", "/x").into_endpoint().unwrap();
        let b = EndpointDraft::new("GET", "/x").into_endpoint().unwrap();
        assert_ne!(a.id, b.id);
    }
}
