//! Enabled authentication modes.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A login mechanism the console may permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationMode {
    /// Any bearer token accepted by the cluster API server.
    Token,
    /// Username and password. Requires the cluster API to accept basic auth.
    Basic,
}

impl fmt::Display for AuthenticationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthenticationMode::Token => f.write_str("token"),
            AuthenticationMode::Basic => f.write_str("basic"),
        }
    }
}

impl FromStr for AuthenticationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "token" => Ok(AuthenticationMode::Token),
            "basic" => Ok(AuthenticationMode::Basic),
            other => Err(format!("unknown authentication mode '{other}'")),
        }
    }
}

/// Set of currently enabled modes.
///
/// Owned by the auth manager instance and fixed after construction; request
/// handling only reads it. Membership is insertion-order-irrelevant.
#[derive(Debug, Clone, Default)]
pub struct AuthenticationModes(HashSet<AuthenticationMode>);

impl AuthenticationModes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a mode. Only meaningful at startup/configuration time.
    pub fn add(&mut self, mode: AuthenticationMode) {
        self.0.insert(mode);
    }

    /// True if the given mode is permitted.
    pub fn is_enabled(&self, mode: AuthenticationMode) -> bool {
        self.0.contains(&mode)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Enabled modes in stable order, for API responses.
    pub fn to_vec(&self) -> Vec<AuthenticationMode> {
        let mut modes: Vec<_> = self.0.iter().copied().collect();
        modes.sort();
        modes
    }
}

impl FromIterator<AuthenticationMode> for AuthenticationModes {
    fn from_iter<I: IntoIterator<Item = AuthenticationMode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("token".parse::<AuthenticationMode>().unwrap(), AuthenticationMode::Token);
        assert_eq!("Basic".parse::<AuthenticationMode>().unwrap(), AuthenticationMode::Basic);
        assert!("oidc".parse::<AuthenticationMode>().is_err());

        assert_eq!(AuthenticationMode::Token.to_string(), "token");
        assert_eq!(AuthenticationMode::Basic.to_string(), "basic");
    }

    #[test]
    fn test_membership() {
        let mut modes = AuthenticationModes::new();
        assert!(modes.is_empty());

        modes.add(AuthenticationMode::Token);
        assert!(modes.is_enabled(AuthenticationMode::Token));
        assert!(!modes.is_enabled(AuthenticationMode::Basic));

        // Adding twice is a no-op
        modes.add(AuthenticationMode::Token);
        assert_eq!(modes.to_vec(), vec![AuthenticationMode::Token]);
    }

    #[test]
    fn test_to_vec_is_stable() {
        let modes: AuthenticationModes =
            [AuthenticationMode::Basic, AuthenticationMode::Token].into_iter().collect();
        assert_eq!(
            modes.to_vec(),
            vec![AuthenticationMode::Token, AuthenticationMode::Basic]
        );
    }

    #[test]
    fn test_serde_rename() {
        let json = serde_json::to_string(&AuthenticationMode::Token).unwrap();
        assert_eq!(json, "\"token\"");
    }
}
