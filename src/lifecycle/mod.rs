//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load endpoints → Build initial routes → Bind listener
//!     → Spawn coordinator and server → Run editor (or wait headless)
//!
//! Shutdown (shutdown.rs):
//!     quit / signal → Broadcast → Server drains → Handles dropped
//!     → Coordinator loop ends
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, a busy port included
//! - Listener binds before the editor starts, so a failure surfaces at once

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{run, Mode, StartupError};
