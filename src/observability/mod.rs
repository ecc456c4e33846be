//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatcher / reload coordinator / editor
//!     → logging.rs (structured events, audit line per served mock)
//!     → metrics.rs (request and reload counters)
//!
//! Consumers:
//!     → stderr (stdout belongs to the console editor)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - RUST_LOG wins over the configured level
//! - Metric updates are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
