//! Opaque session tokens.
//!
//! A token is an encrypted, authenticated envelope carrying one credential
//! and an absolute expiration. No server-side session record exists for a
//! live token: validity is determined purely by successful decryption plus
//! the expiration check.

pub mod cipher;
pub mod envelope;
pub mod manager;

pub use envelope::{Credential, TokenEnvelope};
pub use manager::{TokenManager, DEFAULT_TOKEN_TTL};
