//! Relay Core Library
//!
//! This crate provides the contract types for the relay suspension bridge:
//! a synchronous caller invokes an operation that may either complete
//! immediately or suspend, handing the caller-supplied continuation to
//! whoever will eventually produce the outcome. The continuation is
//! resumed at most once with a success or failure payload.
//!
//! # Key Components
//!
//! - **Continuation**: one-shot handoff cell carrying the caller's context
//! - **Outcome**: the tagged success/failure payload delivered on resumption
//! - **Invocation**: the operation's authoritative completed-vs-suspended return
//! - **Suspendable**: the capability trait for operations that may suspend
//!
//! # Example
//!
//! ```
//! use relay_core::prelude::*;
//!
//! // An operation that never suspends.
//! let op = FnOperation::new(|n: u32, _cont: Continuation<u32, String>| {
//!     Invocation::Completed(n * 2)
//! });
//!
//! let (continuation, _slot) = Continuation::new(Context::empty());
//! assert_eq!(op.invoke(21, continuation), Invocation::Completed(42));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod continuation;
pub mod error;
pub mod operation;
pub mod outcome;
pub mod prelude;

// Re-export key types at crate root for convenience
pub use context::Context;
pub use continuation::{Continuation, OutcomeSlot};
pub use error::{RelayError, Result};
pub use operation::{FnOperation, Suspendable};
pub use outcome::{Invocation, Outcome};
