//! Authentication for GitHub
//!
//! Supports an explicit token, environment variables and the `gh` CLI.

mod github;

pub use github::{GitHubAuthConfig, get_github_auth, resolve_token};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed on the command line
    Flag,
    /// Token from environment variable
    EnvVar,
    /// Token from `gh auth token`
    Cli,
}
