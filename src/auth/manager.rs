//! Login orchestration.
//!
//! The auth manager is the top-level facade of the subsystem: it validates a
//! login request against the enabled modes, derives exactly one credential,
//! and asks the token manager to mint a token. Authorization is not decided
//! here - the cluster API server checks the credential when it is actually
//! used, which is also why a successful login carries a warning that the
//! credentials were not validated yet.

use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::api::{AuthResponse, LoginSpec};
use crate::auth::kubeconfig::credential_from_kubeconfig;
use crate::auth::modes::{AuthenticationMode, AuthenticationModes};
use crate::token::envelope::Credential;
use crate::token::manager::TokenManager;
use crate::types::{Result, WicketError};

/// Warning attached to successful logins: this subsystem never talks to the
/// cluster, so the credential is only checked on first use.
const UNVERIFIED_WARNING: &str =
    "credentials were not validated against the cluster; they will be checked on first use";

/// User authentication management.
pub struct AuthManager {
    token_manager: Arc<TokenManager>,
    modes: AuthenticationModes,
    authentication_skippable: bool,
}

impl AuthManager {
    pub fn new(
        token_manager: Arc<TokenManager>,
        modes: AuthenticationModes,
        authentication_skippable: bool,
    ) -> Self {
        Self {
            token_manager,
            modes,
            authentication_skippable,
        }
    }

    /// Authenticate a user based on the provided login spec.
    ///
    /// Exactly one credential is derived, by precedence: explicit bearer
    /// token > explicit username/password > parsed kubeconfig. Fails with
    /// [`WicketError::ModeDisabled`] when the only usable material maps to a
    /// disabled mode and [`WicketError::InvalidCredentials`] when nothing
    /// usable is present at all.
    pub async fn login(&self, spec: &LoginSpec) -> Result<AuthResponse> {
        let credential = self.derive_credential(spec)?;
        let name = credential.subject().map(str::to_string);

        let jwe_token = self.token_manager.generate(&credential).await?;
        info!(subject = name.as_deref().unwrap_or("<unknown>"), "User logged in");

        Ok(AuthResponse {
            name,
            jwe_token,
            errors: vec![UNVERIFIED_WARNING.to_string()],
        })
    }

    /// Refresh a token that has not expired yet.
    ///
    /// [`WicketError::TokenExpired`] propagates unchanged to the caller and
    /// forces a re-login; it is never converted into a fresh anonymous token.
    pub async fn refresh(&self, jwe_token: &str) -> Result<String> {
        self.token_manager.refresh(jwe_token).await
    }

    /// Snapshot of the enabled authentication modes.
    pub fn authentication_modes(&self) -> Vec<AuthenticationMode> {
        self.modes.to_vec()
    }

    /// Whether the login page may offer a skip button. Pure UI hint; does not
    /// permit unauthenticated API access downstream.
    pub fn authentication_skippable(&self) -> bool {
        self.authentication_skippable
    }

    /// Normalize the login spec into exactly one credential.
    fn derive_credential(&self, spec: &LoginSpec) -> Result<Credential> {
        let mut disabled: Option<AuthenticationMode> = None;

        if !spec.token.is_empty() {
            if self.modes.is_enabled(AuthenticationMode::Token) {
                return Ok(Credential::Bearer {
                    token: spec.token.clone(),
                });
            }
            disabled = Some(AuthenticationMode::Token);
        }

        if !spec.username.is_empty() && !spec.password.is_empty() {
            if self.modes.is_enabled(AuthenticationMode::Basic) {
                return Ok(Credential::Basic {
                    username: spec.username.clone(),
                    password: spec.password.clone(),
                });
            }
            disabled = disabled.or(Some(AuthenticationMode::Basic));
        }

        if !spec.kubeconfig.is_empty() {
            let credential = credential_from_kubeconfig(&spec.kubeconfig)?;
            match self.mode_of(&credential) {
                Some(mode) if !self.modes.is_enabled(mode) => {
                    disabled = disabled.or(Some(mode));
                }
                _ => return Ok(credential),
            }
        }

        if let Some(mode) = disabled {
            debug!(mode = %mode, "Login attempted with disabled authentication mode");
            return Err(WicketError::ModeDisabled(mode));
        }

        Err(WicketError::InvalidCredentials(
            "no credentials provided".into(),
        ))
    }

    /// Mode a credential falls under. Client certificates are not gated by a
    /// mode: they only ever arrive through a kubeconfig.
    fn mode_of(&self, credential: &Credential) -> Option<AuthenticationMode> {
        match credential {
            Credential::Bearer { .. } => Some(AuthenticationMode::Token),
            Credential::Basic { .. } => Some(AuthenticationMode::Basic),
            Credential::ClientCert { .. } => None,
        }
    }
}
