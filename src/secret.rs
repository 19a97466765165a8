//! External secret store interface.
//!
//! All mutable state shared between console replicas (the token encryption
//! key, optional custom certificate material) lives in an external secret
//! store. Convergence across replicas relies on the store's create-if-absent
//! atomicity, not on coordination between processes.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::types::Result;

/// Outcome of a create-if-absent operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The value was stored under the given name.
    Created,
    /// Another writer got there first; the stored value was left untouched.
    AlreadyExists,
}

/// Named-blob secret store with get and create-if-absent semantics.
///
/// Implementations map onto whatever the deployment provides (cluster secret
/// objects in production). Store reachability failures must surface as
/// [`crate::WicketError::SecretStore`] so callers can fail the requested
/// operation instead of silently falling back to replica-local state.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the value stored under `name`, or `None` if absent.
    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `name` unless a value already exists.
    ///
    /// Must be atomic with respect to concurrent `create` calls for the same
    /// name: exactly one caller observes [`CreateOutcome::Created`].
    async fn create(&self, name: &str, value: &[u8]) -> Result<CreateOutcome>;
}

/// In-memory secret store for tests and single-process dev mode.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    entries: DashMap<String, Vec<u8>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a stored value, bypassing create-if-absent semantics.
    #[cfg(test)]
    pub(crate) fn overwrite(&self, name: &str, value: Vec<u8>) {
        self.entries.insert(name.to_string(), value);
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(name).map(|v| v.value().clone()))
    }

    async fn create(&self, name: &str, value: &[u8]) -> Result<CreateOutcome> {
        match self.entries.entry(name.to_string()) {
            Entry::Occupied(_) => Ok(CreateOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(value.to_vec());
                Ok(CreateOutcome::Created)
            }
        }
    }
}
