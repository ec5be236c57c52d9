//! Deployment configuration sources.
//!
//! Built-in deployments take their credentials from the environment; a JSON
//! deployment file replaces the built-in entirely (credentials included).

use std::path::Path;

use crate::deployment::{Deployment, DeploymentId};
use crate::error::ConfigError;

pub const ONEINCH_TOKEN_ENV: &str = "CHAINQUOTE_ONEINCH_TOKEN";
pub const ARKEN_USERNAME_ENV: &str = "CHAINQUOTE_ARKEN_USERNAME";
pub const ARKEN_TOKEN_ENV: &str = "CHAINQUOTE_ARKEN_TOKEN";

/// Provider credentials. Unset values are sent as empty strings.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub oneinch_token: String,
    pub arken_username: String,
    pub arken_token: String,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            oneinch_token: std::env::var(ONEINCH_TOKEN_ENV).unwrap_or_default(),
            arken_username: std::env::var(ARKEN_USERNAME_ENV).unwrap_or_default(),
            arken_token: std::env::var(ARKEN_TOKEN_ENV).unwrap_or_default(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("oneinch_token", &redact(&self.oneinch_token))
            .field("arken_username", &self.arken_username)
            .field("arken_token", &redact(&self.arken_token))
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// Where a deployment comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentSource<'a> {
    Builtin(DeploymentId),
    File(&'a Path),
}

/// Resolves and validates the deployment for one invocation.
pub fn resolve(
    source: DeploymentSource<'_>,
    credentials: &Credentials,
) -> Result<Deployment, ConfigError> {
    let deployment = match source {
        DeploymentSource::Builtin(id) => Deployment::builtin(id, credentials)?,
        DeploymentSource::File(path) => load_file(path)?,
    };
    deployment.validate()?;
    Ok(deployment)
}

/// Reads a JSON deployment file.
pub fn load_file(path: &Path) -> Result<Deployment, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let deployment: Deployment =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    deployment.validate()?;
    Ok(deployment)
}
