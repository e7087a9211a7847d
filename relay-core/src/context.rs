//! Caller-supplied propagation context bound to a continuation.
//!
//! The bridge carries the context across the suspension boundary but never
//! interprets its contents. "No context" is a valid, explicit state
//! ([`Context::empty`]), not a null threaded through unchecked.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An immutable, type-keyed propagation bag.
///
/// Elements are arbitrary `Send + Sync` values keyed by their Rust type;
/// at most one element of a given type is present. Adding an element of a
/// type that is already present replaces it. All mutating operations
/// return a new `Context`, so a continuation's binding can never be
/// changed after creation.
///
/// # Example
///
/// ```
/// use relay_core::context::Context;
///
/// #[derive(Debug, PartialEq)]
/// struct CallerName(&'static str);
///
/// let ctx = Context::empty().with(CallerName("worker-1"));
/// assert_eq!(ctx.get::<CallerName>(), Some(&CallerName("worker-1")));
/// assert!(ctx.without::<CallerName>().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    elements: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return a new context with `element` added.
    ///
    /// An existing element of the same type is replaced.
    #[must_use]
    pub fn with<T: Any + Send + Sync>(&self, element: T) -> Self {
        let mut elements = self.elements.clone();
        elements.insert(TypeId::of::<T>(), Arc::new(element));
        Self { elements }
    }

    /// Look up the element of type `T`, if present.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.elements
            .get(&TypeId::of::<T>())
            .and_then(|element| element.downcast_ref::<T>())
    }

    /// Return a new context with the element of type `T` removed.
    #[must_use]
    pub fn without<T: Any + Send + Sync>(&self) -> Self {
        let mut elements = self.elements.clone();
        elements.remove(&TypeId::of::<T>());
        Self { elements }
    }

    /// Check whether an element of type `T` is present.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.elements.contains_key(&TypeId::of::<T>())
    }

    /// Check whether the context carries no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements in the context.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("elements", &self.elements.len())
            .finish()
    }
}
