//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Compile endpoints into ready-to-send response recipes
//! - Key routes by exact path, last registration wins
//! - Answer path lookups in O(1)
//!
//! # Design Decisions
//! - Build never fails: endpoints are validated before they get here, and
//!   anything HTTP still cannot express is degraded with a warning
//! - Shadowing is silent for callers but counted and logged

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use crate::endpoints::{Configuration, Endpoint};

/// A compiled endpoint: everything the dispatcher needs to answer.
#[derive(Debug)]
pub struct Route {
    pub id: String,
    pub method: String,
    pub path: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub delay: Duration,
    pub body: Bytes,
}

impl Route {
    fn compile(endpoint: &Endpoint) -> Self {
        let status = StatusCode::from_u16(endpoint.status_code).unwrap_or_else(|_| {
            tracing::warn!(
                path = %endpoint.path,
                status_code = endpoint.status_code,
                "Status code not representable, serving 200"
            );
            StatusCode::OK
        });

        let mut headers = HeaderMap::with_capacity(endpoint.headers.len());
        for (name, value) in &endpoint.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => {
                    tracing::warn!(path = %endpoint.path, header = %name, "Skipping invalid header");
                }
            }
        }

        Self {
            id: endpoint.id.clone(),
            method: endpoint.method.clone(),
            path: endpoint.path.clone(),
            status,
            headers,
            delay: Duration::from_millis(endpoint.delay_ms),
            body: endpoint.body.clone(),
        }
    }
}

/// Immutable exact-path lookup built from one Configuration snapshot.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<String, Arc<Route>>,
    shadowed: usize,
}

impl RouteTable {
    /// Compile a configuration. Later endpoints overwrite earlier ones that
    /// share the same path, whatever their method.
    pub fn build(config: &Configuration) -> Self {
        let mut routes = HashMap::with_capacity(config.len());
        let mut shadowed = 0;

        for endpoint in config {
            let route = Arc::new(Route::compile(endpoint));
            if let Some(previous) = routes.insert(endpoint.path.clone(), route) {
                shadowed += 1;
                tracing::debug!(
                    path = %endpoint.path,
                    hidden_method = %previous.method,
                    method = %endpoint.method,
                    "Route shadowed by later endpoint"
                );
            }
        }

        Self { routes, shadowed }
    }

    pub fn lookup(&self, path: &str) -> Option<&Arc<Route>> {
        self.routes.get(path)
    }

    /// Number of distinct paths served.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of endpoints hidden by a later endpoint on the same path.
    pub fn shadowed(&self) -> usize {
        self.shadowed
    }
}
