//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! mocksmith.toml (optional)
//!     → loader.rs (parse & deserialize, defaults when absent)
//!     → CLI overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → Settings (immutable for the life of the process)
//!
//! With reload.watch_file:
//!     watcher.rs detects a change to the endpoints file
//!     → EndpointStore reloads it
//!     → snapshot submitted to the reload coordinator
//! ```
//!
//! # Design Decisions
//! - Server settings are fixed at startup; only endpoints hot reload
//! - All fields have defaults to allow an empty or missing file
//! - Validation reports every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_settings, load_settings_or_default, ConfigError};
pub use schema::{
    LimitsConfig, ListenerConfig, ObservabilityConfig, ReloadConfig, Settings, StorageConfig,
};
pub use validation::{validate_settings, ValidationError};
pub use watcher::EndpointsWatcher;
