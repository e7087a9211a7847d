//! Checked invocation of suspendable operations.
//!
//! The operation's return value is authoritative: `Completed` means the
//! result arrived synchronously and the continuation must stay untouched,
//! `Suspended` means the continuation is the only way the outcome will
//! ever arrive. [`dispatch`] enforces that exactly one channel is used.

use relay_core::context::Context;
use relay_core::continuation::Continuation;
use relay_core::error::{RelayError, Result};
use relay_core::operation::Suspendable;
use relay_core::outcome::{Invocation, Outcome};

/// Invoke `op` with `input` and `continuation`, enforcing single delivery.
///
/// # Errors
///
/// Returns [`RelayError::DualDelivery`] if the operation completed
/// synchronously and also resumed its continuation.
pub fn dispatch<O: Suspendable>(
    op: &O,
    input: O::Input,
    continuation: Continuation<O::Output, O::Error>,
) -> Result<Invocation<O::Output>> {
    let probe = continuation.clone();
    let invocation = op.invoke(input, continuation);

    match &invocation {
        Invocation::Completed(_) if probe.is_resumed() => {
            tracing::error!("operation completed synchronously and resumed its continuation");
            Err(RelayError::DualDelivery)
        }
        Invocation::Completed(_) => {
            tracing::debug!("operation completed synchronously");
            Ok(invocation)
        }
        Invocation::Suspended => {
            tracing::debug!("operation suspended");
            Ok(invocation)
        }
    }
}

/// Drive one full caller → callee → caller cycle to its outcome.
///
/// Builds a continuation bound to `context`, dispatches the operation, and
/// either returns the synchronous result directly or parks the calling
/// thread until the deferred producer resumes.
///
/// # Errors
///
/// Propagates protocol violations from [`dispatch`].
pub fn run_to_outcome<O: Suspendable>(
    op: &O,
    input: O::Input,
    context: Context,
) -> Result<Outcome<O::Output, O::Error>> {
    let (continuation, mut slot) = Continuation::new(context);
    match dispatch(op, input, continuation)? {
        Invocation::Completed(value) => Ok(Outcome::Success(value)),
        Invocation::Suspended => slot.wait(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::operation::FnOperation;

    #[test]
    fn synchronous_completion_passes_through() {
        let op = FnOperation::new(|_: (), _cont: Continuation<u32, String>| {
            Invocation::Completed(42)
        });

        let (continuation, _slot) = Continuation::new(Context::empty());
        let invocation = dispatch(&op, (), continuation).unwrap();
        assert_eq!(invocation, Invocation::Completed(42));
    }

    #[test]
    fn dual_delivery_is_reported() {
        // A buggy operation that uses both channels.
        let op = FnOperation::new(|_: (), cont: Continuation<u32, String>| {
            cont.resume_with(Outcome::Success(1)).unwrap();
            Invocation::Completed(1)
        });

        let (continuation, _slot) = Continuation::new(Context::empty());
        let result = dispatch(&op, (), continuation);
        assert_eq!(result, Err(RelayError::DualDelivery));
    }

    #[test]
    fn run_to_outcome_returns_sync_value_without_resuming() {
        let op = FnOperation::new(|_: (), _cont: Continuation<u32, String>| {
            Invocation::Completed(42)
        });

        let outcome = run_to_outcome(&op, (), Context::empty()).unwrap();
        assert_eq!(outcome, Outcome::Success(42));
    }

    #[test]
    fn run_to_outcome_waits_for_inline_resume() {
        // The operation resumes before returning Suspended; the driver must
        // still observe exactly one delivery, through the slot.
        let op = FnOperation::new(|n: u32, cont: Continuation<u32, String>| {
            cont.resume_with(Outcome::Success(n + 1)).unwrap();
            Invocation::Suspended
        });

        let outcome = run_to_outcome(&op, 6, Context::empty()).unwrap();
        assert_eq!(outcome, Outcome::Success(7));
    }

    #[test]
    fn run_to_outcome_delivers_failures_as_data() {
        let op = FnOperation::new(|_: (), cont: Continuation<u32, String>| {
            cont.resume_with(Outcome::Failure("no capacity".to_string()))
                .unwrap();
            Invocation::Suspended
        });

        let outcome = run_to_outcome(&op, (), Context::empty()).unwrap();
        assert_eq!(outcome, Outcome::Failure("no capacity".to_string()));
    }
}
