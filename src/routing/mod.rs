//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (startup and every reload):
//!     Configuration (ordered endpoints)
//!     → table.rs (compile each endpoint into a Route, key by exact path)
//!     → RouteTable (immutable, later entries shadow earlier ones)
//!     → shared.rs (pointer swap under the write lock)
//!
//! Incoming Request (path):
//!     → shared.rs (read lock held for the lookup only)
//!     → Return: Arc<Route> or NoMatch
//! ```
//!
//! # Design Decisions
//! - Tables are never patched; each reload builds a new one off-lock
//! - Exact path matching via HashMap, no wildcards
//! - Method filtering happens per request, not per route key
//! - Routes are Arc'd so in-flight requests outlive the table they came from

pub mod shared;
pub mod table;

pub use shared::SharedRoutes;
pub use table::{Route, RouteTable};
