//! Configuration for Wicket
//!
//! CLI arguments and environment variable handling using clap. The two
//! well-known secret names and the default token TTL can be overridden via
//! environment; an empty value means "use the built-in default".

use std::time::Duration;

use clap::Parser;

use crate::auth::{AuthenticationMode, AuthenticationModes};

/// Built-in name of the secret holding the shared encryption key.
pub const DEFAULT_KEY_HOLDER_NAME: &str = "wicket-key-holder";

/// Built-in name of the secret holding user-provided certificate material.
pub const DEFAULT_CERTS_SECRET_NAME: &str = "wicket-certs";

/// Default expiration time (in seconds) of generated tokens: 15 min.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 900;

/// Wicket - authentication and session token subsystem for cluster consoles
#[derive(Parser, Debug, Clone)]
#[command(name = "wicket")]
#[command(about = "Authentication and session token subsystem for cluster web consoles")]
pub struct Args {
    /// Name of the secret that stores the shared encryption key.
    /// Must be readable by every console replica.
    #[arg(long, env = "KEY_HOLDER_NAME", default_value = DEFAULT_KEY_HOLDER_NAME)]
    pub key_holder_name: String,

    /// Name of the secret that stores user-provided custom certificates
    #[arg(long, env = "CERTS_SECRET_NAME", default_value = DEFAULT_CERTS_SECRET_NAME)]
    pub certs_secret_name: String,

    /// Expiration time (in seconds) of generated tokens
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value_t = DEFAULT_TOKEN_TTL_SECONDS)]
    pub token_ttl_seconds: u64,

    /// Comma-separated list of enabled authentication modes (token, basic)
    #[arg(long, env = "AUTHENTICATION_MODE", default_value = "token")]
    pub authentication_mode: String,

    /// Show the skip button on the login page (UI hint only; does not
    /// permit unauthenticated access downstream)
    #[arg(long, env = "ENABLE_SKIP_LOGIN", default_value = "false")]
    pub enable_skip_login: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Effective key holder secret name (empty override falls back to default).
    pub fn key_holder_name(&self) -> &str {
        if self.key_holder_name.is_empty() {
            DEFAULT_KEY_HOLDER_NAME
        } else {
            &self.key_holder_name
        }
    }

    /// Effective certificate secret name (empty override falls back to default).
    pub fn certs_secret_name(&self) -> &str {
        if self.certs_secret_name.is_empty() {
            DEFAULT_CERTS_SECRET_NAME
        } else {
            &self.certs_secret_name
        }
    }

    /// Token TTL as a [`Duration`].
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_seconds)
    }

    /// Parse the enabled authentication modes.
    ///
    /// Unknown mode names are rejected by [`Args::validate`]; this accessor
    /// silently skips them so it can be called on unvalidated input.
    pub fn enabled_modes(&self) -> AuthenticationModes {
        self.authentication_mode
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<AuthenticationMode>().ok())
            .collect()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.token_ttl_seconds == 0 {
            return Err("TOKEN_TTL_SECONDS must be greater than zero".to_string());
        }

        for raw in self
            .authentication_mode
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            raw.parse::<AuthenticationMode>()
                .map_err(|_| format!("unknown authentication mode '{raw}'"))?;
        }

        if self.enabled_modes().is_empty() {
            return Err("at least one authentication mode must be enabled".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["wicket"];
        full.extend_from_slice(argv);
        Args::parse_from(full)
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.key_holder_name(), DEFAULT_KEY_HOLDER_NAME);
        assert_eq!(args.certs_secret_name(), DEFAULT_CERTS_SECRET_NAME);
        assert_eq!(args.token_ttl(), Duration::from_secs(900));
        assert!(!args.enable_skip_login);
        assert!(args.validate().is_ok());

        let modes = args.enabled_modes();
        assert!(modes.is_enabled(AuthenticationMode::Token));
        assert!(!modes.is_enabled(AuthenticationMode::Basic));
    }

    #[test]
    fn test_empty_override_falls_back_to_default() {
        let args = parse(&["--key-holder-name", "", "--certs-secret-name", ""]);
        assert_eq!(args.key_holder_name(), DEFAULT_KEY_HOLDER_NAME);
        assert_eq!(args.certs_secret_name(), DEFAULT_CERTS_SECRET_NAME);
    }

    #[test]
    fn test_custom_secret_names() {
        let args = parse(&["--key-holder-name", "console-key", "--certs-secret-name", "console-certs"]);
        assert_eq!(args.key_holder_name(), "console-key");
        assert_eq!(args.certs_secret_name(), "console-certs");
    }

    #[test]
    fn test_mode_list_parsing() {
        let args = parse(&["--authentication-mode", "token, basic"]);
        let modes = args.enabled_modes();
        assert!(modes.is_enabled(AuthenticationMode::Token));
        assert!(modes.is_enabled(AuthenticationMode::Basic));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_mode() {
        let args = parse(&["--authentication-mode", "token,oidc"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let args = parse(&["--token-ttl-seconds", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_mode_list() {
        let args = parse(&["--authentication-mode", " , "]);
        assert!(args.validate().is_err());
    }
}
