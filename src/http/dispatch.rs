//! Request dispatch against the published route table.
//!
//! # Responsibilities
//! - Answer CORS preflight without touching the table
//! - Resolve the exact percent-decoded path, then check the method
//! - Simulate latency, then write status, headers and body verbatim
//!
//! # Design Decisions
//! - The read lock covers the lookup only; the delay runs on the captured
//!   `Arc<Route>`, so a reload during the sleep does not affect the response
//! - 404 and 405 responses carry no diagnostic detail

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use percent_encoding::percent_decode_str;

use crate::observability::{logging::AUDIT_TARGET, metrics};
use crate::routing::{Route, SharedRoutes};

/// Body of the response for paths no endpoint is registered on.
pub const NOT_FOUND_MESSAGE: &str = "Endpoint not found. Add it via the TUI!";

/// Application state injected into the dispatcher.
#[derive(Debug, Clone)]
pub struct AppState {
    pub routes: SharedRoutes,
    pub max_delay: Option<Duration>,
}

impl AppState {
    pub fn new(routes: SharedRoutes) -> Self {
        Self {
            routes,
            max_delay: None,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Option<Duration>) -> Self {
        self.max_delay = max_delay;
        self
    }

    fn delay_for(&self, route: &Route) -> Duration {
        match self.max_delay {
            Some(max) => route.delay.min(max),
            None => route.delay,
        }
    }
}

/// Catch-all handler serving every mock endpoint.
pub async fn dispatch(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    // Endpoints are stored as typed, so `/café` must match `/caf%C3%A9`.
    let path = percent_decode_str(uri.path()).decode_utf8_lossy();
    let Some(route) = state.routes.resolve(&path) else {
        tracing::debug!(method = %method, path = %path, "No endpoint registered");
        metrics::record_request(metrics::method_label(&method), StatusCode::NOT_FOUND.as_u16());
        return not_found();
    };

    if route.method != method.as_str() {
        tracing::debug!(method = %method, path = %path, expected = %route.method, "Method not allowed");
        metrics::record_request(metrics::method_label(&method), StatusCode::METHOD_NOT_ALLOWED.as_u16());
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let delay = state.delay_for(&route);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let response = render(&route);
    tracing::info!(
        target: AUDIT_TARGET,
        method = %route.method,
        path = %route.path,
        status = route.status.as_u16(),
        "Served mock response"
    );
    metrics::record_request(&route.method, route.status.as_u16());
    response
}

fn render(route: &Route) -> Response {
    let mut response = Response::new(Body::from(route.body.clone()));
    *response.status_mut() = route.status;

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    for (name, value) in &route.headers {
        headers.insert(name.clone(), value.clone());
    }
    response
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": NOT_FOUND_MESSAGE })),
    )
        .into_response()
}
