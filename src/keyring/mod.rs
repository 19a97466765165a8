//! Shared key and certificate custody.
//!
//! The token encryption key is held in the external secret store under a
//! well-known name so that every console replica seals and opens the same
//! tokens. This module owns the fetch-or-create lifecycle of that key and
//! the read side of the separate custom-certificate secret.

pub mod certs;
pub mod holder;

pub use certs::CertificateStore;
pub use holder::{EncryptionKey, KeyHolder, KEY_LEN};
