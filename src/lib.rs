//! Local mock API server with live editing.
//!
//! Endpoints (method, path, status, headers, delay, JSON body) are defined
//! from an interactive editor and served over HTTP immediately. Every change
//! produces a new Configuration snapshot that flows through a bounded channel
//! to a single reload worker, which rebuilds the route table off-lock and
//! swaps it in behind a read/write lock.

pub mod config;
pub mod editor;
pub mod endpoints;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod reload;
pub mod routing;

pub use config::Settings;
pub use endpoints::{Configuration, Endpoint, EndpointDraft};
pub use http::MockServer;
pub use lifecycle::Shutdown;
pub use reload::{reload_channel, ReloadCoordinator, ReloadHandle};
