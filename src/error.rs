//! Error types for ticket-pr

use thiserror::Error;

/// Errors produced by the PR workflow
#[derive(Debug, Error)]
pub enum Error {
    /// No usable credential
    #[error("authentication error: {0}")]
    Auth(String),

    /// No repository could be determined
    #[error("could not resolve a GitHub repository: {0}")]
    RepositoryUnresolved(String),

    /// Operator input that cannot be used
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Non-success response from the GitHub API
    #[error("GitHub API returned {status}: {body}")]
    GitHubApi {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Base branch lookup failed, so nothing was created
    #[error("failed to fetch base branch '{branch}': {reason}")]
    BaseBranchNotFound {
        /// Base branch name
        branch: String,
        /// Underlying failure
        reason: String,
    },

    /// Branch reference creation failed
    #[error("failed to create branch '{branch}': {reason}")]
    BranchCreate {
        /// Branch that was being created
        branch: String,
        /// Underlying failure
        reason: String,
    },

    /// GitHub refused to open the pull request
    #[error("failed to create pull request ({status}): {body}")]
    PullRequestRejected {
        /// HTTP status code
        status: u16,
        /// Raw response body, shown verbatim
        body: String,
    },

    /// PR number missing from a pull request URL
    #[error("could not extract PR number from URL: {0}")]
    PrNumber(String),

    /// PR template could not be loaded
    #[error("failed to load PR template: {0}")]
    Template(String),

    /// Interactive prompt failure
    #[error("prompt error: {0}")]
    Prompt(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed URL
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
