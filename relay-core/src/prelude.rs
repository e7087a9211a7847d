//! Prelude for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! # Example
//!
//! ```
//! use relay_core::prelude::*;
//! ```

// Error handling
pub use crate::error::{RelayError, Result};

// Contract types
pub use crate::context::Context;
pub use crate::continuation::{Continuation, OutcomeSlot};
pub use crate::outcome::{Invocation, Outcome};

// Operations
pub use crate::operation::{FnOperation, Suspendable};
