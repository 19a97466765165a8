//! Credential envelope codec.
//!
//! Defines the plaintext structure encrypted into a token: exactly one
//! credential plus an absolute expiration timestamp. Serialized as JSON;
//! the encoding round-trips exactly through seal/open.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Result, WicketError};

/// Decrypted identity material usable to build a cluster API client.
///
/// Exactly one variant is populated at a time. A kubeconfig input may yield
/// any one of the three depending on its contents, never a mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Credential {
    /// Username/password for basic authentication against the cluster API.
    Basic { username: String, password: String },

    /// Any bearer token accepted by the cluster API server.
    Bearer { token: String },

    /// Client certificate pair (PEM, inline) with optional CA bundle.
    ClientCert {
        cert_data: String,
        key_data: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        ca_data: Option<String>,
    },
}

impl Credential {
    /// Best-effort subject name for display in login responses.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Credential::Basic { username, .. } => Some(username),
            Credential::Bearer { .. } | Credential::ClientCert { .. } => None,
        }
    }
}

/// The plaintext structure encrypted into a token.
///
/// Immutable once created: refresh mints a new envelope rather than mutating
/// the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEnvelope {
    pub credential: Credential,
    pub expires_at: DateTime<Utc>,
}

impl TokenEnvelope {
    pub fn new(credential: Credential, expires_at: DateTime<Utc>) -> Self {
        Self {
            credential,
            expires_at,
        }
    }

    /// True once the envelope's expiration has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Serialize for encryption.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| WicketError::Internal(format!("envelope serialization failed: {e}")))
    }

    /// Deserialize a decrypted payload.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| WicketError::MalformedEnvelope(e.to_string()))
    }
}
