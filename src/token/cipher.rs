//! Token sealing and opening.
//!
//! # Algorithm
//!
//! ChaCha20-Poly1305 authenticated encryption over the serialized envelope.
//! The token string is `base64url(nonce || ciphertext || tag)` with no
//! padding, safe for transport in an HTTP header or JSON field.
//!
//! Any bit flip, truncation, or key mismatch fails closed: the Poly1305 tag
//! check rejects the whole token.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chacha20poly1305::aead::Aead;
use chacha20poly1305::{ChaCha20Poly1305, Key, KeyInit, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::keyring::EncryptionKey;
use crate::types::{Result, WicketError};

/// Nonce length for ChaCha20-Poly1305 (12 bytes).
pub const NONCE_LEN: usize = 12;

/// Poly1305 authentication tag length (16 bytes).
pub const TAG_LEN: usize = 16;

/// Encrypt a serialized envelope into an opaque token string.
///
/// A fresh random nonce is drawn per call, so sealing the same plaintext
/// twice yields different tokens.
pub fn seal(key: &EncryptionKey, plaintext: &[u8]) -> Result<String> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| WicketError::Internal("token encryption failed".into()))?;

    let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    payload.extend_from_slice(&nonce_bytes);
    payload.extend_from_slice(&ciphertext);

    Ok(URL_SAFE_NO_PAD.encode(payload))
}

/// Decrypt an opaque token string back into the serialized envelope.
///
/// Fails with [`WicketError::MalformedToken`] when the string is not validly
/// encoded or framed (checked before any decryption is attempted) and with
/// [`WicketError::DecryptionFailed`] on tag mismatch.
pub fn open(key: &EncryptionKey, token: &str) -> Result<Vec<u8>> {
    let payload = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| WicketError::MalformedToken(format!("invalid base64: {e}")))?;

    if payload.len() < NONCE_LEN + TAG_LEN {
        return Err(WicketError::MalformedToken(format!(
            "payload too short: {} bytes",
            payload.len()
        )));
    }

    let (nonce_bytes, ciphertext) = payload.split_at(NONCE_LEN);
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| WicketError::DecryptionFailed)
}
