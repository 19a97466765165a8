//! Custom certificate material.
//!
//! Operators may provide their own certificate bundle through a secret that
//! is separate from the key holder secret; the two are never mixed. This
//! subsystem only reads the material and hands it to whoever builds the
//! outward-facing TLS configuration.

use std::sync::Arc;

use tracing::debug;

use crate::secret::SecretStore;
use crate::types::Result;

/// Read side of the custom-certificate secret.
pub struct CertificateStore {
    store: Arc<dyn SecretStore>,
    secret_name: String,
}

impl CertificateStore {
    pub fn new(store: Arc<dyn SecretStore>, secret_name: impl Into<String>) -> Self {
        Self {
            store,
            secret_name: secret_name.into(),
        }
    }

    /// Name of the secret this store reads.
    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    /// Fetch the user-provided certificate bundle, if any.
    pub async fn get(&self) -> Result<Option<Vec<u8>>> {
        let material = self.store.get(&self.secret_name).await?;
        if material.is_some() {
            debug!(secret = %self.secret_name, "Loaded custom certificate material");
        }
        Ok(material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::MemorySecretStore;

    #[tokio::test]
    async fn test_absent_certs_return_none() {
        let store = Arc::new(MemorySecretStore::new());
        let certs = CertificateStore::new(store, "wicket-certs");
        assert_eq!(certs.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_returns_stored_bundle() {
        let store = Arc::new(MemorySecretStore::new());
        store.create("wicket-certs", b"-----BEGIN CERTIFICATE-----").await.unwrap();

        let certs = CertificateStore::new(store, "wicket-certs");
        let material = certs.get().await.unwrap().unwrap();
        assert!(material.starts_with(b"-----BEGIN"));
    }

    #[tokio::test]
    async fn test_separate_from_key_secret() {
        let store = Arc::new(MemorySecretStore::new());
        store.create("wicket-key-holder", &[7u8; 32]).await.unwrap();

        let certs = CertificateStore::new(store, "wicket-certs");
        assert_eq!(certs.get().await.unwrap(), None);
    }
}
