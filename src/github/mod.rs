//! GitHub REST API access
//!
//! The workflow talks to GitHub only through [`GitHubApi`], so tests can
//! substitute a recording mock for the HTTP client.

mod client;

pub use client::{DEFAULT_API_URL, GitHubClient};

use crate::error::Result;
use crate::types::{
    BranchLookup, BranchRef, CreatedPullRequest, PullRequestPayload, RepoSpec, Repository,
    Reviewer,
};
use async_trait::async_trait;

/// GitHub operations used by the PR workflow
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Login of the authenticated user
    async fn current_user(&self) -> Result<String>;

    /// Repositories visible to the authenticated user
    async fn list_repositories(&self) -> Result<Vec<Repository>>;

    /// Look up `heads/<branch>`
    ///
    /// Never fails: a 404 is [`BranchLookup::Missing`], any other failure
    /// is [`BranchLookup::Unknown`] with the status or transport error.
    async fn branch_exists(&self, repo: &RepoSpec, branch: &str) -> BranchLookup;

    /// Look up the tip of a branch
    async fn get_branch(&self, repo: &RepoSpec, branch: &str) -> Result<BranchRef>;

    /// Create `refs/heads/<branch>` pointing at `sha`
    async fn create_branch(&self, repo: &RepoSpec, branch: &str, sha: &str) -> Result<BranchRef>;

    /// Logins of repository collaborators
    async fn list_collaborators(&self, repo: &RepoSpec) -> Result<Vec<String>>;

    /// Slugs of teams with access to the repository
    async fn list_teams(&self, repo: &RepoSpec) -> Result<Vec<String>>;

    /// Open a pull request
    async fn create_pull_request(
        &self,
        repo: &RepoSpec,
        payload: &PullRequestPayload,
    ) -> Result<CreatedPullRequest>;

    /// Request reviews on an existing pull request
    async fn request_reviewers(
        &self,
        repo: &RepoSpec,
        pr_number: u64,
        reviewers: &[Reviewer],
    ) -> Result<()>;
}
