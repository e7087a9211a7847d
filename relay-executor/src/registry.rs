//! Registry of parked continuations awaiting external resumption.
//!
//! When an operation suspends on behalf of an external event (a webhook,
//! an approval, a timer), it parks its continuation here under a hook ID.
//! Whoever observes the event later resumes by ID; each hook resumes at
//! most once because resuming consumes the parked continuation.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use relay_core::continuation::Continuation;
use relay_core::error::{RelayError, Result};
use relay_core::outcome::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Generate a fresh hook ID.
pub fn generate_hook_id() -> String {
    format!("hook_{}", Uuid::new_v4())
}

/// Metadata recorded when a continuation is parked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkedMeta {
    /// Hook ID under which the continuation is parked.
    pub hook_id: String,
    /// When the continuation was parked.
    pub created_at: DateTime<Utc>,
    /// Caller-supplied metadata (correlation IDs, approval details, ...).
    ///
    /// Opaque to the registry; surfaced unchanged on resume.
    pub metadata: serde_json::Value,
}

impl ParkedMeta {
    fn new(hook_id: impl Into<String>, metadata: serde_json::Value) -> Self {
        Self {
            hook_id: hook_id.into(),
            created_at: Utc::now(),
            metadata,
        }
    }
}

/// In-memory registry of parked continuations keyed by hook ID.
pub struct ResumeRegistry<T, E> {
    parked: RwLock<HashMap<String, (Continuation<T, E>, ParkedMeta)>>,
}

impl<T, E> ResumeRegistry<T, E> {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            parked: RwLock::new(HashMap::new()),
        }
    }

    /// Park a continuation under `hook_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::HookInUse`] if a continuation is already
    /// parked under this ID.
    pub fn park(
        &self,
        hook_id: impl Into<String>,
        continuation: Continuation<T, E>,
        metadata: serde_json::Value,
    ) -> Result<()> {
        let hook_id = hook_id.into();
        let mut parked = self.parked.write();

        if parked.contains_key(&hook_id) {
            return Err(RelayError::HookInUse { hook_id });
        }

        let meta = ParkedMeta::new(hook_id.clone(), metadata);
        parked.insert(hook_id.clone(), (continuation, meta));
        tracing::info!(hook_id = %hook_id, "Continuation parked");
        Ok(())
    }

    /// Park a continuation under a generated hook ID and return the ID.
    ///
    /// # Errors
    ///
    /// See [`park`](Self::park); a generated ID cannot realistically
    /// collide, but the same contract applies.
    pub fn park_anonymous(
        &self,
        continuation: Continuation<T, E>,
        metadata: serde_json::Value,
    ) -> Result<String> {
        let hook_id = generate_hook_id();
        self.park(hook_id.clone(), continuation, metadata)?;
        Ok(hook_id)
    }

    /// Resume the continuation parked under `hook_id` with `outcome`,
    /// consuming the parked entry.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::HookNotFound`] if nothing is parked under the
    /// ID (including a hook that was already resumed), and propagates
    /// [`RelayError::AlreadyResumed`] if the parked continuation was
    /// resumed out of band.
    pub fn resume(&self, hook_id: &str, outcome: Outcome<T, E>) -> Result<ParkedMeta> {
        let (continuation, meta) =
            self.parked
                .write()
                .remove(hook_id)
                .ok_or_else(|| RelayError::HookNotFound {
                    hook_id: hook_id.to_string(),
                })?;

        continuation.resume_with(outcome)?;
        tracing::info!(hook_id = %hook_id, "Continuation resumed");
        Ok(meta)
    }

    /// Check if a continuation is parked under `hook_id`.
    pub fn is_parked(&self, hook_id: &str) -> bool {
        self.parked.read().contains_key(hook_id)
    }

    /// Get the metadata for a parked continuation without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::HookNotFound`] if nothing is parked under the ID.
    pub fn get_meta(&self, hook_id: &str) -> Result<ParkedMeta> {
        self.parked
            .read()
            .get(hook_id)
            .map(|(_, meta)| meta.clone())
            .ok_or_else(|| RelayError::HookNotFound {
                hook_id: hook_id.to_string(),
            })
    }

    /// List the hook IDs of all parked continuations.
    pub fn list_hooks(&self) -> Vec<String> {
        self.parked.read().keys().cloned().collect()
    }

    /// Get the count of parked continuations.
    pub fn count(&self) -> usize {
        self.parked.read().len()
    }

    /// Discard a parked continuation without resuming it.
    ///
    /// Any waiter on the paired slot is abandoned and will only observe a
    /// timeout. Missing hooks are ignored.
    pub fn remove(&self, hook_id: &str) {
        if self.parked.write().remove(hook_id).is_some() {
            tracing::warn!(hook_id = %hook_id, "Parked continuation discarded");
        }
    }
}

impl<T, E> Default for ResumeRegistry<T, E> {
    fn default() -> Self {
        Self::new()
    }
}
