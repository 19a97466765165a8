//! Wire types for the login surface.
//!
//! These mirror what the frontend sends and receives; the HTTP routing layer
//! that carries them lives outside this crate.

use serde::{Deserialize, Serialize};

use crate::auth::modes::AuthenticationMode;

/// Raw user input extracted from a login request.
///
/// All fields are optional; credential derivation picks exactly one
/// representation by precedence (token > username/password > kubeconfig).
/// Kubeconfig content must be fully inline - no external file paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginSpec {
    /// Username for basic authentication to the cluster.
    pub username: String,
    /// Password for basic authentication to the cluster.
    pub password: String,
    /// Bearer token for authentication to the cluster.
    pub token: String,
    /// Content of the user's kubeconfig file.
    pub kubeconfig: String,
}

/// Response for login requests.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// User/subject name, when one could be extracted from the credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Token carrying the credential in its encrypted payload.
    pub jwe_token: String,
    /// Non-critical errors that happened during the login request.
    pub errors: Vec<String>,
}

/// Request body for the token refresh operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRefreshSpec {
    pub jwe_token: String,
}

/// Enabled authentication modes, for the login page.
#[derive(Debug, Serialize)]
pub struct LoginModesResponse {
    pub modes: Vec<AuthenticationMode>,
}

/// Tells the UI whether to show the skip button. Hiding the button does not
/// disable unauthenticated access downstream.
#[derive(Debug, Serialize)]
pub struct LoginSkippableResponse {
    pub skippable: bool,
}
