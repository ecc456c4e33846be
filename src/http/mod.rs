//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request id, tracing, CORS headers, panic recovery
//!     → dispatch.rs (OPTIONS preflight, route lookup, method check)
//!     → canned response (status, headers, raw JSON body)
//! ```

pub mod cors;
pub mod dispatch;
pub mod server;

pub use dispatch::{AppState, NOT_FOUND_MESSAGE};
pub use server::MockServer;
