//! Wicket - authentication and session token subsystem for cluster consoles
//!
//! Wicket turns user-supplied credentials (username/password, bearer token,
//! or an inline kubeconfig document) into opaque, encrypted, time-limited
//! session tokens, and later decrypts those tokens back into the credential
//! material needed to act on the user's behalf against a cluster API.
//!
//! The console runs as multiple stateless replicas; tokens minted by one
//! replica must open on any other. The shared encryption key therefore lives
//! in an external secret store under a well-known name, created once per
//! deployment and fetched by every replica on demand.
//!
//! ## Components
//!
//! - **auth**: login validation, mode gating, kubeconfig parsing
//! - **token**: envelope codec, AEAD cipher, generate/decrypt/refresh
//! - **keyring**: shared key fetch-or-create, custom certificate material
//! - **secret**: the external secret store interface
//!
//! Authorization, credential validation against the cluster, and transport
//! security are all out of scope: the cluster API server checks credentials
//! when they are used, and the service runs behind TLS termination.

pub mod auth;
pub mod config;
pub mod keyring;
pub mod logging;
pub mod secret;
pub mod token;
pub mod types;

pub use auth::{AuthManager, AuthenticationMode, AuthenticationModes, LoginSpec};
pub use config::Args;
pub use keyring::{CertificateStore, EncryptionKey, KeyHolder};
pub use secret::{MemorySecretStore, SecretStore};
pub use token::{Credential, TokenManager};
pub use types::{Result, WicketError};
