//! Hot reload subsystem.
//!
//! # Data Flow
//! ```text
//! Editor / file watcher
//!     → handle.rs (submit a full Configuration snapshot)
//!     → bounded channel (capacity 10, FIFO)
//!     → coordinator.rs (Idle → Building → Publishing → Idle)
//!     → routing::SharedRoutes (pointer swap)
//!     → dispatchers observe the new table on their next lookup
//! ```
//!
//! # Design Decisions
//! - One consumer: the coordinator is the only writer of the shared table
//! - Producers block when the channel is full; snapshots are never dropped
//! - The table is built before the write lock is taken
//! - The loop ends when every handle is dropped

pub mod coordinator;
pub mod handle;

pub use coordinator::{reload_channel, Phase, ReloadCoordinator, DEFAULT_CHANNEL_CAPACITY};
pub use handle::{ReloadHandle, SubmitError};
