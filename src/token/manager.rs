//! Token lifecycle orchestration.
//!
//! # Responsibilities
//!
//! - Mint tokens: envelope the credential, encode, seal with the shared key
//! - Decrypt tokens back into credential material
//! - Refresh tokens that have not yet expired
//! - Own the TTL policy (default 900 s, changeable at runtime)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use crate::keyring::KeyHolder;
use crate::token::cipher;
use crate::token::envelope::{Credential, TokenEnvelope};
use crate::types::{Result, WicketError};

/// Default expiration time of generated tokens: 15 min.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(900);

/// Generates, decrypts, and refreshes opaque session tokens.
///
/// Safe to share across concurrent requests: the key is immutable once
/// fetched and the TTL is a single atomic value read at call start.
/// Concurrent TTL updates are last-writer-wins and affect only subsequently
/// generated tokens.
pub struct TokenManager {
    keys: Arc<KeyHolder>,
    ttl_seconds: AtomicU64,
}

impl TokenManager {
    /// Create a manager with the default TTL.
    pub fn new(keys: Arc<KeyHolder>) -> Self {
        Self::with_ttl(keys, DEFAULT_TOKEN_TTL)
    }

    /// Create a manager with an explicit TTL.
    pub fn with_ttl(keys: Arc<KeyHolder>, ttl: Duration) -> Self {
        Self {
            keys,
            ttl_seconds: AtomicU64::new(ttl.as_secs()),
        }
    }

    /// Current TTL applied to newly generated tokens.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds.load(Ordering::Relaxed))
    }

    /// Change the TTL for subsequently generated tokens.
    ///
    /// Never rewrites already-issued tokens.
    pub fn set_token_ttl(&self, ttl: Duration) {
        self.ttl_seconds.store(ttl.as_secs(), Ordering::Relaxed);
    }

    /// Mint a token carrying `credential`, expiring TTL from now.
    pub async fn generate(&self, credential: &Credential) -> Result<String> {
        let ttl = self.token_ttl();
        let expires_at = Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| WicketError::Internal(format!("TTL out of range: {e}")))?;

        let envelope = TokenEnvelope::new(credential.clone(), expires_at);
        let key = self.keys.get_or_create().await?;
        let token = cipher::seal(key, &envelope.encode()?)?;

        debug!(expires_at = %expires_at, "Generated session token");
        Ok(token)
    }

    /// Decrypt a token and return the credential it carries.
    ///
    /// Does **not** check expiration: callers authenticating a request must
    /// use [`TokenManager::verify`] instead. `decrypt` exists for call sites
    /// that explicitly want to inspect an expired token.
    pub async fn decrypt(&self, token: &str) -> Result<Credential> {
        let envelope = self.open_envelope(token).await?;
        Ok(envelope.credential)
    }

    /// Decrypt a token and check its expiration.
    ///
    /// This is the operation request-authenticating call sites should use.
    pub async fn verify(&self, token: &str) -> Result<Credential> {
        let envelope = self.open_envelope(token).await?;
        if envelope.is_expired(Utc::now()) {
            return Err(WicketError::TokenExpired);
        }
        Ok(envelope.credential)
    }

    /// Re-issue a not-yet-expired token with a fresh expiration.
    ///
    /// Refresh is additive, not destructive: the original token remains valid
    /// until its own expiration (there is no server-side revocation list).
    pub async fn refresh(&self, token: &str) -> Result<String> {
        let envelope = self.open_envelope(token).await?;
        if envelope.is_expired(Utc::now()) {
            debug!(expired_at = %envelope.expires_at, "Refusing to refresh expired token");
            return Err(WicketError::TokenExpired);
        }

        self.generate(&envelope.credential).await
    }

    async fn open_envelope(&self, token: &str) -> Result<TokenEnvelope> {
        let key = self.keys.get_or_create().await?;
        let plaintext = cipher::open(key, token).inspect_err(|e| {
            if matches!(e, WicketError::DecryptionFailed) {
                warn!("Token failed authentication check (wrong key or tampering)");
            }
        })?;
        TokenEnvelope::decode(&plaintext)
    }
}
