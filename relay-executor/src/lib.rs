//! Relay Executor - Dispatch and resumption infrastructure.
//!
//! This crate provides the machinery around the core continuation contract:
//! - Checked invocation of suspendable operations (dual-delivery detection)
//! - A blocking driver for the full caller → callee → caller cycle
//! - A registry of parked continuations keyed by hook ID
//! - A background producer that resumes from another thread

#![warn(missing_docs)]

pub mod dispatch;
pub mod producer;
pub mod registry;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::dispatch::{dispatch, run_to_outcome};
    pub use crate::producer::Producer;
    pub use crate::registry::{generate_hook_id, ParkedMeta, ResumeRegistry};
}
