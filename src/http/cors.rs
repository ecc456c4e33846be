//! Permissive cross-origin headers.
//!
//! The headers are set on every response only when absent, so an endpoint
//! may override them with its own headers.

use axum::http::{header, HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, PATCH, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// One layer per CORS header, applied if the response lacks it.
pub fn layers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    [
        layer(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
        layer(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
        layer(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
    ]
}

fn layer(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}
