//! Shared encryption key lifecycle.
//!
//! # Responsibilities
//!
//! - Fetch the shared symmetric key from the external secret store
//! - Generate and persist fresh key material when none exists yet
//! - Converge with other replicas racing on first creation
//! - Cache the resolved key for the process lifetime
//!
//! The key is never rotated automatically: rotation would invalidate every
//! outstanding token across the deployment.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::secret::{CreateOutcome, SecretStore};
use crate::types::{Result, WicketError};

/// Symmetric key length in bytes (ChaCha20-Poly1305).
pub const KEY_LEN: usize = 32;

/// The shared symmetric token encryption key.
///
/// Key material is zeroized when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    /// Wrap raw key material.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Generate fresh random key material from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Reconstruct a key from stored bytes, validating the length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            WicketError::SecretStore(format!(
                "stored key has invalid length: expected {KEY_LEN}, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.write_str("EncryptionKey(..)")
    }
}

/// Owns access to the shared key secret at runtime.
///
/// The first call to [`KeyHolder::get_or_create`] performs the store round
/// trip; subsequent calls return the cached key. Store unreachability is a
/// hard error - a silently generated local-only key would make tokens
/// unverifiable by the other replicas.
pub struct KeyHolder {
    store: Arc<dyn SecretStore>,
    secret_name: String,
    cached: OnceCell<EncryptionKey>,
}

impl KeyHolder {
    pub fn new(store: Arc<dyn SecretStore>, secret_name: impl Into<String>) -> Self {
        Self {
            store,
            secret_name: secret_name.into(),
            cached: OnceCell::new(),
        }
    }

    /// Name of the secret this holder manages.
    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    /// Fetch the shared key, creating it if this deployment has none yet.
    ///
    /// Tolerates creation races between replicas: the loser of the race
    /// discards its own generated material and re-fetches the winner's value,
    /// so all replicas converge on one key.
    pub async fn get_or_create(&self) -> Result<&EncryptionKey> {
        self.cached.get_or_try_init(|| self.resolve()).await
    }

    async fn resolve(&self) -> Result<EncryptionKey> {
        if let Some(bytes) = self.store.get(&self.secret_name).await? {
            debug!(secret = %self.secret_name, "Loaded shared encryption key");
            return EncryptionKey::from_bytes(&bytes);
        }

        let fresh = EncryptionKey::generate();
        match self.store.create(&self.secret_name, fresh.as_bytes()).await? {
            CreateOutcome::Created => {
                info!(secret = %self.secret_name, "Created shared encryption key");
                Ok(fresh)
            }
            CreateOutcome::AlreadyExists => {
                // Lost the creation race to another replica; its value wins.
                debug!(secret = %self.secret_name, "Lost key creation race, refetching");
                let bytes = self.store.get(&self.secret_name).await?.ok_or_else(|| {
                    WicketError::SecretStore(format!(
                        "secret '{}' vanished after creation race",
                        self.secret_name
                    ))
                })?;
                EncryptionKey::from_bytes(&bytes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::secret::MemorySecretStore;

    /// Store stub that always fails, for the unreachable-store path.
    struct UnreachableStore;

    #[async_trait]
    impl SecretStore for UnreachableStore {
        async fn get(&self, _name: &str) -> Result<Option<Vec<u8>>> {
            Err(WicketError::SecretStore("connection refused".into()))
        }

        async fn create(&self, _name: &str, _value: &[u8]) -> Result<CreateOutcome> {
            Err(WicketError::SecretStore("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_creates_key_when_absent() {
        let store = Arc::new(MemorySecretStore::new());
        let holder = KeyHolder::new(store.clone(), "wicket-key-holder");

        let key = holder.get_or_create().await.unwrap().clone();

        let stored = store.get("wicket-key-holder").await.unwrap().unwrap();
        assert_eq!(stored.len(), KEY_LEN);
        assert_eq!(key.as_bytes().as_slice(), stored.as_slice());
    }

    #[tokio::test]
    async fn test_second_replica_gets_same_key() {
        let store = Arc::new(MemorySecretStore::new());

        let first = KeyHolder::new(store.clone(), "wicket-key-holder");
        let second = KeyHolder::new(store.clone(), "wicket-key-holder");

        let k1 = first.get_or_create().await.unwrap().clone();
        let k2 = second.get_or_create().await.unwrap().clone();
        assert_eq!(k1, k2);
    }

    #[tokio::test]
    async fn test_concurrent_replicas_converge() {
        let store = Arc::new(MemorySecretStore::new());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let holder = KeyHolder::new(store, "wicket-key-holder");
                holder.get_or_create().await.unwrap().clone()
            }));
        }

        let mut keys = Vec::new();
        for handle in handles {
            keys.push(handle.await.unwrap());
        }
        assert!(keys.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[tokio::test]
    async fn test_key_is_cached_after_first_fetch() {
        let store = Arc::new(MemorySecretStore::new());
        let holder = KeyHolder::new(store.clone(), "wicket-key-holder");

        let first = holder.get_or_create().await.unwrap().clone();

        // Mutating the store afterwards must not affect the cached key.
        store.overwrite("wicket-key-holder", vec![0u8; KEY_LEN]);
        let second = holder.get_or_create().await.unwrap().clone();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_invalid_stored_length_is_rejected() {
        let store = Arc::new(MemorySecretStore::new());
        store.create("wicket-key-holder", b"short").await.unwrap();

        let holder = KeyHolder::new(store, "wicket-key-holder");
        let err = holder.get_or_create().await.unwrap_err();
        assert!(matches!(err, WicketError::SecretStore(_)));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_fatal() {
        let holder = KeyHolder::new(Arc::new(UnreachableStore), "wicket-key-holder");
        let err = holder.get_or_create().await.unwrap_err();
        assert!(matches!(err, WicketError::SecretStore(_)));
    }
}
