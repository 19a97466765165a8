//! Inline kubeconfig parsing.
//!
//! A login request may carry a full kubeconfig document. Exactly one
//! credential is extracted from it - bearer token, username/password, or an
//! inline client-certificate pair - selected from the current context's user.
//!
//! All certificate and key material must be inline (`*-data` fields). Any
//! reference to an external file path is rejected: the console cannot and
//! must not read files off its own filesystem on a user's behalf.

use serde::Deserialize;

use crate::token::envelope::Credential;
use crate::types::{Result, WicketError};

#[derive(Debug, Deserialize)]
struct KubeConfig {
    #[serde(rename = "current-context", default)]
    current_context: String,
    #[serde(default)]
    contexts: Vec<NamedContext>,
    #[serde(default)]
    clusters: Vec<NamedCluster>,
    #[serde(default)]
    users: Vec<NamedAuthInfo>,
}

#[derive(Debug, Deserialize)]
struct NamedContext {
    name: String,
    #[serde(default)]
    context: Context,
}

#[derive(Debug, Default, Deserialize)]
struct Context {
    #[serde(default)]
    cluster: String,
    #[serde(default)]
    user: String,
}

#[derive(Debug, Deserialize)]
struct NamedCluster {
    name: String,
    #[serde(default)]
    cluster: Cluster,
}

#[derive(Debug, Default, Deserialize)]
struct Cluster {
    #[serde(rename = "certificate-authority-data", default)]
    certificate_authority_data: String,
    #[serde(rename = "certificate-authority", default)]
    certificate_authority: String,
}

#[derive(Debug, Deserialize)]
struct NamedAuthInfo {
    name: String,
    #[serde(default)]
    user: AuthInfo,
}

#[derive(Debug, Default, Deserialize)]
struct AuthInfo {
    #[serde(default)]
    token: String,
    #[serde(rename = "tokenFile", default)]
    token_file: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(rename = "client-certificate-data", default)]
    client_certificate_data: String,
    #[serde(rename = "client-certificate", default)]
    client_certificate: String,
    #[serde(rename = "client-key-data", default)]
    client_key_data: String,
    #[serde(rename = "client-key", default)]
    client_key: String,
}

/// Extract exactly one credential from inline kubeconfig text.
pub fn credential_from_kubeconfig(text: &str) -> Result<Credential> {
    let config: KubeConfig = serde_yaml::from_str(text)
        .map_err(|e| WicketError::InvalidCredentials(format!("kubeconfig parse error: {e}")))?;

    let (auth_info, cluster) = select_auth_info(&config)?;
    reject_path_references(auth_info, cluster)?;

    // Precedence within the kubeconfig: token > basic > client certificate
    if !auth_info.token.is_empty() {
        return Ok(Credential::Bearer {
            token: auth_info.token.clone(),
        });
    }

    if !auth_info.username.is_empty() && !auth_info.password.is_empty() {
        return Ok(Credential::Basic {
            username: auth_info.username.clone(),
            password: auth_info.password.clone(),
        });
    }

    if !auth_info.client_certificate_data.is_empty() && !auth_info.client_key_data.is_empty() {
        let ca_data = cluster
            .filter(|c| !c.certificate_authority_data.is_empty())
            .map(|c| c.certificate_authority_data.clone());
        return Ok(Credential::ClientCert {
            cert_data: auth_info.client_certificate_data.clone(),
            key_data: auth_info.client_key_data.clone(),
            ca_data,
        });
    }

    Err(WicketError::InvalidCredentials(
        "kubeconfig contains no usable credentials".into(),
    ))
}

/// Pick the user (and its context's cluster) the kubeconfig designates.
///
/// The current context wins; without one, a single-user kubeconfig is
/// unambiguous enough to accept.
fn select_auth_info<'a>(
    config: &'a KubeConfig,
) -> Result<(&'a AuthInfo, Option<&'a Cluster>)> {
    if !config.current_context.is_empty() {
        let context = config
            .contexts
            .iter()
            .find(|c| c.name == config.current_context)
            .map(|c| &c.context)
            .ok_or_else(|| {
                WicketError::InvalidCredentials(format!(
                    "kubeconfig current-context '{}' not found",
                    config.current_context
                ))
            })?;

        let auth_info = config
            .users
            .iter()
            .find(|u| u.name == context.user)
            .map(|u| &u.user)
            .ok_or_else(|| {
                WicketError::InvalidCredentials(format!(
                    "kubeconfig user '{}' not found",
                    context.user
                ))
            })?;

        let cluster = config
            .clusters
            .iter()
            .find(|c| c.name == context.cluster)
            .map(|c| &c.cluster);

        return Ok((auth_info, cluster));
    }

    match config.users.as_slice() {
        [only] => Ok((&only.user, config.clusters.first().map(|c| &c.cluster))),
        [] => Err(WicketError::InvalidCredentials(
            "kubeconfig defines no users".into(),
        )),
        _ => Err(WicketError::InvalidCredentials(
            "kubeconfig has multiple users and no current-context".into(),
        )),
    }
}

/// Fail if any credential field points at an external file.
fn reject_path_references(auth_info: &AuthInfo, cluster: Option<&Cluster>) -> Result<()> {
    let mut paths = Vec::new();
    if !auth_info.token_file.is_empty() {
        paths.push("tokenFile");
    }
    if !auth_info.client_certificate.is_empty() {
        paths.push("client-certificate");
    }
    if !auth_info.client_key.is_empty() {
        paths.push("client-key");
    }
    if cluster.is_some_and(|c| !c.certificate_authority.is_empty()) {
        paths.push("certificate-authority");
    }

    if paths.is_empty() {
        Ok(())
    } else {
        Err(WicketError::InvalidCredentials(format!(
            "kubeconfig references external file paths ({}); all data must be inline",
            paths.join(", ")
        )))
    }
}
