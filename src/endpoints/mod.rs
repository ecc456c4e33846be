//! Endpoint definitions and the editor-side working copy.
//!
//! # Data Flow
//! ```text
//! operator text (method, path, status, delay, headers, body)
//!     → draft.rs (normalize & validate, assign id)
//!     → model.rs (Endpoint appended to the Configuration)
//!     → store.rs (persist working copy as JSON)
//!     → snapshot handed to the reload coordinator
//! ```
//!
//! # Design Decisions
//! - Validation happens once, here; the routing core trusts every
//!   Configuration it receives
//! - Bodies are kept as raw bytes and written back verbatim
//! - Configuration order is insertion order and only matters for display

pub mod draft;
pub mod model;
pub mod store;

pub use draft::{EndpointDraft, EndpointError, DEFAULT_BODY};
pub use model::{Configuration, Endpoint};
pub use store::{EndpointStore, StoreError};
