//! Outcome and invocation-result types.

use serde::{Deserialize, Serialize};

/// The tagged payload delivered at most once per continuation.
///
/// A failure here is ordinary data produced by the suspended work, not a
/// contract violation: it travels through the outcome channel because the
/// consumer may be resumed on an execution context unrelated to the
/// original caller's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome<T, E> {
    /// The suspended work produced a value.
    Success(T),
    /// The suspended work failed.
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    /// Check if this outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if this outcome is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Extract the success value, if any.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Extract the failure value, if any.
    pub fn failure(self) -> Option<E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Convert into a `std::result::Result`.
    pub fn into_result(self) -> std::result::Result<T, E> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }
}

impl<T, E> From<std::result::Result<T, E>> for Outcome<T, E> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

/// Authoritative return value of a suspendable invocation.
///
/// The caller distinguishes synchronous completion from suspension by this
/// value alone; it never inspects the continuation's internal state. After
/// `Suspended`, the continuation firing is the only legitimate way the
/// caller learns the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Invocation<T> {
    /// The operation produced its result without suspending.
    Completed(T),
    /// The operation deferred; the outcome arrives through the continuation.
    Suspended,
}

impl<T> Invocation<T> {
    /// Check if the operation suspended.
    pub fn is_suspended(&self) -> bool {
        matches!(self, Self::Suspended)
    }

    /// Check if the operation completed synchronously.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Extract the synchronously produced value, if any.
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Suspended => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_accessors() {
        let ok: Outcome<u32, String> = Outcome::Success(7);
        assert!(ok.is_success());
        assert_eq!(ok.success(), Some(7));

        let err: Outcome<u32, String> = Outcome::Failure("boom".to_string());
        assert!(err.is_failure());
        assert_eq!(err.failure(), Some("boom".to_string()));
    }

    #[test]
    fn outcome_result_round_trip() {
        let outcome: Outcome<u32, String> = Ok(5).into();
        assert_eq!(outcome, Outcome::Success(5));
        assert_eq!(outcome.into_result(), Ok(5));

        let outcome: Outcome<u32, String> = Err("nope".to_string()).into();
        assert_eq!(outcome.clone().into_result(), Err("nope".to_string()));
    }

    #[test]
    fn invocation_accessors() {
        let done: Invocation<u32> = Invocation::Completed(42);
        assert!(done.is_completed());
        assert_eq!(done.completed(), Some(42));

        let pending: Invocation<u32> = Invocation::Suspended;
        assert!(pending.is_suspended());
        assert_eq!(pending.completed(), None);
    }
}
