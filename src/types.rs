//! Error types shared across the crate.

use crate::auth::AuthenticationMode;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WicketError>;

/// Errors produced by the authentication/token subsystem.
///
/// The variants split into two families: mistakes a legitimate user can make
/// (bad login input, disabled mode) and structural failures that indicate
/// tampering or a system fault (malformed tokens, failed decryption,
/// unreachable secret store). Use [`WicketError::is_user_error`] to tell them
/// apart when deciding what to surface to a client.
#[derive(Debug, thiserror::Error)]
pub enum WicketError {
    /// Login input was empty, malformed, or referenced external files.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The credential type present in the login request is not permitted.
    #[error("authentication mode '{0}' is disabled")]
    ModeDisabled(AuthenticationMode),

    /// Token string is not validly encoded or framed; rejected before any
    /// decryption is attempted.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Token decrypted but its payload does not deserialize to an envelope.
    #[error("malformed token envelope: {0}")]
    MalformedEnvelope(String),

    /// Authentication tag mismatch: wrong key, rotated key, or tampering.
    #[error("token decryption failed: wrong key or tampered token")]
    DecryptionFailed,

    /// Token is structurally valid but past its expiration.
    #[error("token has expired")]
    TokenExpired,

    /// The external secret store could not be reached or answered garbage.
    #[error("secret store unavailable: {0}")]
    SecretStore(String),

    /// Invariant violation inside the subsystem itself.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WicketError {
    /// True when a legitimate user could cause this error by mistake.
    ///
    /// Everything else indicates tampering or a system fault and should be
    /// treated as a hard failure and logged.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            WicketError::InvalidCredentials(_)
                | WicketError::ModeDisabled(_)
                | WicketError::TokenExpired
        )
    }
}
