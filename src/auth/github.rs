//! GitHub authentication

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use std::env;
use std::fmt;
use tokio::process::Command;

/// Environment variables checked for a token, in order
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// GitHub authentication configuration
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Authentication token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

impl fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Get GitHub authentication
///
/// Priority:
/// 1. explicit token (`--token`)
/// 2. `GITHUB_TOKEN` environment variable
/// 3. `GH_TOKEN` environment variable
/// 4. gh CLI (`gh auth token`)
pub async fn get_github_auth(explicit: Option<&str>) -> Result<GitHubAuthConfig> {
    if let Some(config) = resolve_token(explicit, |key| env::var(key).ok()) {
        return Ok(config);
    }

    if let Some(token) = get_gh_cli_token().await {
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    Err(Error::Auth(
        "No GitHub token found. Set GITHUB_TOKEN, pass --token or run `gh auth login`".to_string(),
    ))
}

/// Resolve a token from an explicit value or the environment
///
/// Blank values are treated as absent.
pub fn resolve_token(
    explicit: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<GitHubAuthConfig> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Some(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::Flag,
        });
    }

    TOKEN_ENV_VARS.iter().find_map(|key| {
        lookup(key)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(|token| GitHubAuthConfig {
                token,
                source: AuthSource::EnvVar,
            })
    })
}

async fn get_gh_cli_token() -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() { None } else { Some(token) }
}
