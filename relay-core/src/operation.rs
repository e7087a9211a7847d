//! The suspendable-operation capability.

use crate::continuation::Continuation;
use crate::outcome::Invocation;
use std::marker::PhantomData;

/// An operation that may suspend instead of returning.
///
/// Implementations take ordinary input plus one continuation and either:
///
/// - complete synchronously, returning [`Invocation::Completed`] without
///   touching the continuation, or
/// - forward the continuation (at most once) to whoever will produce the
///   outcome and return [`Invocation::Suspended`].
///
/// Doing both delivers the result through two channels and is reported by
/// the dispatcher as a dual delivery.
///
/// This is deliberately a single-method capability: any suspendable
/// operation is just a function of shape `(input, continuation) ->
/// Invocation`, not a member of an inheritance hierarchy.
pub trait Suspendable: Send + Sync {
    /// Input accepted by the operation.
    type Input;
    /// Value produced on success.
    type Output;
    /// Failure carried through the outcome channel.
    type Error;

    /// Invoke the operation with `input` and the caller's continuation.
    fn invoke(
        &self,
        input: Self::Input,
        continuation: Continuation<Self::Output, Self::Error>,
    ) -> Invocation<Self::Output>;
}

/// Adapter turning a closure of the right shape into a [`Suspendable`].
///
/// # Example
///
/// ```
/// use relay_core::prelude::*;
///
/// let double = FnOperation::new(|n: u32, _cont: Continuation<u32, String>| {
///     Invocation::Completed(n * 2)
/// });
///
/// let (continuation, _slot) = Continuation::new(Context::empty());
/// assert_eq!(double.invoke(3, continuation), Invocation::Completed(6));
/// ```
pub struct FnOperation<F, I, T, E> {
    f: F,
    _marker: PhantomData<fn(I) -> (T, E)>,
}

impl<F, I, T, E> FnOperation<F, I, T, E>
where
    F: Fn(I, Continuation<T, E>) -> Invocation<T> + Send + Sync,
{
    /// Wrap a closure as a suspendable operation.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<F, I, T, E> Suspendable for FnOperation<F, I, T, E>
where
    F: Fn(I, Continuation<T, E>) -> Invocation<T> + Send + Sync,
{
    type Input = I;
    type Output = T;
    type Error = E;

    fn invoke(&self, input: I, continuation: Continuation<T, E>) -> Invocation<T> {
        (self.f)(input, continuation)
    }
}
