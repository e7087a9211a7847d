//! Background producer that resumes a continuation from another thread.

use relay_core::continuation::Continuation;
use relay_core::error::{RelayError, Result};
use relay_core::outcome::Outcome;
use std::thread::{self, JoinHandle};

/// Hands a continuation to a separate execution context.
///
/// The producer runs the supplied closure on its own thread and resumes
/// the continuation with whatever outcome the closure computes. The join
/// handle is kept so callers can bound the handoff deterministically.
///
/// # Example
///
/// ```
/// use relay_core::prelude::*;
/// use relay_executor::producer::Producer;
///
/// let (continuation, mut slot) = Continuation::new(Context::empty());
/// let producer = Producer::spawn(continuation, || Outcome::<_, String>::Success(7));
///
/// assert_eq!(slot.wait(), Ok(Outcome::Success(7)));
/// producer.join().unwrap();
/// ```
#[derive(Debug)]
pub struct Producer {
    handle: JoinHandle<Result<()>>,
}

impl Producer {
    /// Spawn a producer that computes an outcome and resumes `continuation`.
    pub fn spawn<T, E, F>(continuation: Continuation<T, E>, produce: F) -> Self
    where
        T: Send + 'static,
        E: Send + 'static,
        F: FnOnce() -> Outcome<T, E> + Send + 'static,
    {
        let handle = thread::spawn(move || {
            let outcome = produce();
            continuation.resume_with(outcome)
        });
        Self { handle }
    }

    /// Wait for the producer to finish its handoff.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::ProducerPanicked`] if the producer thread
    /// panicked before resuming, and propagates any violation its
    /// `resume_with` hit.
    pub fn join(self) -> Result<()> {
        self.handle
            .join()
            .map_err(|_| RelayError::ProducerPanicked)?
    }
}
