//! The one-shot continuation and its consumer-side outcome slot.
//!
//! A [`Continuation`] represents the caller's promise to accept exactly one
//! eventual outcome. The at-most-once property comes from the delivery
//! cell's own state machine (Unresumed is initial, Resumed is terminal),
//! not from ad-hoc flags: the first `resume_with` wins, and every later
//! attempt gets [`RelayError::AlreadyResumed`] back.

use crate::context::Context;
use crate::error::{RelayError, Result};
use crate::outcome::Outcome;
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Downstream action registered by the caller, run once on delivery.
type ResumeCallback<T, E> = Box<dyn FnOnce(Outcome<T, E>) + Send>;

/// Delivery cell state. Unresumed → Resumed is the only transition.
enum Cell<T, E> {
    /// No outcome yet. Holds the callback for callback-style continuations;
    /// slot-style continuations store the outcome on delivery instead.
    Unresumed(Option<ResumeCallback<T, E>>),
    /// Outcome delivered. `None` once the consumer has taken it.
    Resumed(Option<Outcome<T, E>>),
}

struct Shared<T, E> {
    context: Context,
    cell: Mutex<Cell<T, E>>,
    delivered: Condvar,
}

/// A one-shot handle for delivering the outcome of a suspended operation.
///
/// Created by the caller immediately before invoking a suspendable
/// operation and handed to it; whoever the operation delegates the handle
/// to holds the right to resume. The handle is cheaply cloneable so a
/// duplicate delivery can be *observed* and reported, but the contract is
/// still single-writer: exactly one `resume_with` succeeds.
///
/// # Example
///
/// ```
/// use relay_core::prelude::*;
///
/// let (continuation, mut slot) = Continuation::new(Context::empty());
/// continuation.resume_with(Outcome::<_, String>::Success(7)).unwrap();
/// assert_eq!(slot.try_take(), Some(Outcome::Success(7)));
/// ```
pub struct Continuation<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> Continuation<T, E> {
    /// Create a continuation bound to `context`, paired with the
    /// [`OutcomeSlot`] the caller will consume the outcome from.
    pub fn new(context: Context) -> (Self, OutcomeSlot<T, E>) {
        let shared = Arc::new(Shared {
            context,
            cell: Mutex::new(Cell::Unresumed(None)),
            delivered: Condvar::new(),
        });
        (
            Self {
                shared: Arc::clone(&shared),
            },
            OutcomeSlot { shared },
        )
    }

    /// Create a continuation whose downstream action is a callback.
    ///
    /// The callback runs exactly once, inline on whichever thread performs
    /// the successful `resume_with`.
    pub fn with_callback<F>(context: Context, callback: F) -> Self
    where
        F: FnOnce(Outcome<T, E>) + Send + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                context,
                cell: Mutex::new(Cell::Unresumed(Some(Box::new(callback)))),
                delivered: Condvar::new(),
            }),
        }
    }

    /// Get the context bound at creation.
    ///
    /// The binding is immutable: this returns the same context before and
    /// after resumption. Callers must tolerate an empty context.
    pub fn context(&self) -> &Context {
        &self.shared.context
    }

    /// Check whether this continuation has been resumed.
    pub fn is_resumed(&self) -> bool {
        matches!(&*self.shared.cell.lock(), Cell::Resumed(_))
    }

    /// Deliver the outcome, transitioning Unresumed → Resumed.
    ///
    /// Runs the registered downstream action (callback, or waking slot
    /// waiters) and establishes a happens-before edge between the producer
    /// of the outcome and its consumer.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::AlreadyResumed`] if the continuation was
    /// already resumed. The late outcome is discarded; the outcome
    /// delivered first is left untouched.
    pub fn resume_with(&self, outcome: Outcome<T, E>) -> Result<()> {
        let mut cell = self.shared.cell.lock();
        match std::mem::replace(&mut *cell, Cell::Resumed(None)) {
            Cell::Resumed(stored) => {
                *cell = Cell::Resumed(stored);
                drop(cell);
                tracing::warn!("duplicate resume_with rejected");
                Err(RelayError::AlreadyResumed)
            }
            Cell::Unresumed(Some(callback)) => {
                // Run the callback outside the lock so it may inspect the
                // continuation without deadlocking.
                drop(cell);
                tracing::debug!("continuation resumed via callback");
                callback(outcome);
                Ok(())
            }
            Cell::Unresumed(None) => {
                *cell = Cell::Resumed(Some(outcome));
                drop(cell);
                tracing::debug!("continuation resumed");
                self.shared.delivered.notify_all();
                Ok(())
            }
        }
    }
}

impl<T, E> Clone for Continuation<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> fmt::Debug for Continuation<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("resumed", &self.is_resumed())
            .field("context", &self.shared.context)
            .finish()
    }
}

/// Consumer side of a slot-style continuation.
///
/// This is the caller's registered downstream action for "suspension
/// complete": poll with [`try_take`](Self::try_take) or park the calling
/// thread with [`wait`](Self::wait). The outcome can be taken at most once.
pub struct OutcomeSlot<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> OutcomeSlot<T, E> {
    /// Take the outcome without blocking.
    ///
    /// Returns `None` while the continuation is unresumed, and after the
    /// outcome has already been taken.
    pub fn try_take(&mut self) -> Option<Outcome<T, E>> {
        match &mut *self.shared.cell.lock() {
            Cell::Resumed(outcome) => outcome.take(),
            Cell::Unresumed(_) => None,
        }
    }

    /// Park the calling thread until the outcome is delivered.
    ///
    /// This is the logical blocking point of the bridge: the caller needed
    /// the result before proceeding and the operation suspended.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::OutcomeTaken`] if the outcome was already
    /// consumed from this slot.
    pub fn wait(&mut self) -> Result<Outcome<T, E>> {
        let mut cell = self.shared.cell.lock();
        loop {
            if let Cell::Resumed(outcome) = &mut *cell {
                return outcome.take().ok_or(RelayError::OutcomeTaken);
            }
            self.shared.delivered.wait(&mut cell);
        }
    }

    /// Park the calling thread until the outcome is delivered, giving up
    /// after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::OutcomeTimeout`] if the outcome does not
    /// arrive in time, or [`RelayError::OutcomeTaken`] if it was already
    /// consumed.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Result<Outcome<T, E>> {
        let deadline = Instant::now() + timeout;
        let mut cell = self.shared.cell.lock();
        loop {
            if let Cell::Resumed(outcome) = &mut *cell {
                return outcome.take().ok_or(RelayError::OutcomeTaken);
            }
            if self
                .shared
                .delivered
                .wait_until(&mut cell, deadline)
                .timed_out()
            {
                return Err(RelayError::OutcomeTimeout {
                    waited_ms: timeout.as_millis() as u64,
                });
            }
        }
    }

    /// Check whether the paired continuation has been resumed.
    pub fn is_resumed(&self) -> bool {
        matches!(&*self.shared.cell.lock(), Cell::Resumed(_))
    }
}

impl<T, E> fmt::Debug for OutcomeSlot<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutcomeSlot")
            .field("resumed", &self.is_resumed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::thread;

    #[test]
    fn fresh_continuation_is_unresumed() {
        let (continuation, mut slot) = Continuation::<u32, String>::new(Context::empty());
        assert!(!continuation.is_resumed());
        assert_eq!(slot.try_take(), None);
    }

    #[test]
    fn resume_delivers_to_slot() {
        let (continuation, mut slot) = Continuation::<u32, String>::new(Context::empty());
        continuation.resume_with(Outcome::Success(7)).unwrap();

        assert!(continuation.is_resumed());
        assert_eq!(slot.try_take(), Some(Outcome::Success(7)));
        // At most one take.
        assert_eq!(slot.try_take(), None);
    }

    #[test]
    fn second_resume_is_rejected_and_outcome_is_intact() {
        let (continuation, mut slot) = Continuation::<u32, String>::new(Context::empty());
        continuation.resume_with(Outcome::Success(7)).unwrap();

        let late = continuation.resume_with(Outcome::Success(99));
        assert_eq!(late, Err(RelayError::AlreadyResumed));
        assert_eq!(slot.try_take(), Some(Outcome::Success(7)));
    }

    #[test]
    fn failure_outcome_travels_as_data() {
        let (continuation, mut slot) = Continuation::<u32, String>::new(Context::empty());
        continuation
            .resume_with(Outcome::Failure("backend unavailable".to_string()))
            .unwrap();

        assert_eq!(
            slot.try_take(),
            Some(Outcome::Failure("backend unavailable".to_string()))
        );
    }

    #[test]
    fn callback_runs_exactly_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let seen = Arc::new(Mutex::new(None));

        let continuation = {
            let calls = Arc::clone(&calls);
            let seen = Arc::clone(&seen);
            Continuation::<u32, String>::with_callback(Context::empty(), move |outcome| {
                calls.fetch_add(1, Ordering::SeqCst);
                *seen.lock() = Some(outcome);
            })
        };

        continuation.resume_with(Outcome::Success(7)).unwrap();
        assert_eq!(
            continuation.resume_with(Outcome::Success(99)),
            Err(RelayError::AlreadyResumed)
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock(), Some(Outcome::Success(7)));
    }

    #[test]
    fn context_binding_is_immutable_across_resumption() {
        #[derive(Debug, PartialEq)]
        struct Caller(&'static str);

        let ctx = Context::empty().with(Caller("origin"));
        let (continuation, _slot) = Continuation::<u32, String>::new(ctx);

        assert_eq!(continuation.context().get::<Caller>(), Some(&Caller("origin")));
        continuation.resume_with(Outcome::Success(1)).unwrap();
        assert_eq!(continuation.context().get::<Caller>(), Some(&Caller("origin")));
    }

    #[test]
    fn empty_context_is_a_valid_binding() {
        let (continuation, _slot) = Continuation::<u32, String>::new(Context::empty());
        assert!(continuation.context().is_empty());
    }

    #[test]
    fn wait_observes_cross_thread_resume() {
        let (continuation, mut slot) = Continuation::<u32, String>::new(Context::empty());

        let producer = thread::spawn(move || {
            continuation.resume_with(Outcome::Success(7)).unwrap();
        });

        assert_eq!(slot.wait(), Ok(Outcome::Success(7)));
        producer.join().unwrap();
    }

    #[test]
    fn wait_timeout_expires_when_never_resumed() {
        let (_continuation, mut slot) = Continuation::<u32, String>::new(Context::empty());
        let result = slot.wait_timeout(Duration::from_millis(20));
        assert_eq!(result, Err(RelayError::OutcomeTimeout { waited_ms: 20 }));
    }

    #[test]
    fn wait_after_take_reports_consumed_outcome() {
        let (continuation, mut slot) = Continuation::<u32, String>::new(Context::empty());
        continuation.resume_with(Outcome::Success(7)).unwrap();

        assert_eq!(slot.try_take(), Some(Outcome::Success(7)));
        assert_eq!(slot.wait(), Err(RelayError::OutcomeTaken));
    }
}
