//! Interactive endpoint editor.
//!
//! # Data Flow
//! ```text
//! operator line
//!     → command.rs (parse into a Command)
//!     → session.rs (mutate working copy, persist, submit snapshot)
//!     → console.rs (print result, prompt again)
//! ```
//!
//! # Design Decisions
//! - The editor owns its working copy; the core only sees submitted clones
//! - Submission waits when the reload queue is full instead of dropping
//! - Line oriented, so it runs over any reader/writer pair

pub mod command;
pub mod console;
pub mod session;

pub use command::{Command, CommandError};
pub use session::{Editor, EditorError};
