//! Authentication for the console login surface.
//!
//! Provides:
//! - Login request validation and credential derivation
//! - Authentication mode gating (token, basic)
//! - Inline kubeconfig parsing
//! - Token refresh delegation

pub mod api;
pub mod kubeconfig;
pub mod manager;
pub mod modes;

pub use api::{AuthResponse, LoginModesResponse, LoginSkippableResponse, LoginSpec, TokenRefreshSpec};
pub use manager::AuthManager;
pub use modes::{AuthenticationMode, AuthenticationModes};
