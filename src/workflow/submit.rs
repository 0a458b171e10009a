//! Pull request submission and reviewer requests

use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::types::{PullRequestPayload, RepoSpec, Reviewer};
use regex::Regex;
use std::sync::LazyLock;

static RE_PR_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/pull/(\d+)(?:[/?#]|$)").expect("hardcoded regex is valid"));

/// Outcome of posting a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrResult {
    /// GitHub created the PR
    Created {
        /// Web URL of the new PR
        html_url: String,
    },
    /// GitHub refused the PR
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },
}

/// What happened to the reviewer request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewerOutcome {
    /// No request was made (no reviewers, or no PR)
    NotRequested,
    /// Reviewers were requested on the given PR number
    Assigned(u64),
    /// The request failed; the PR itself stands
    Failed(String),
}

/// Extract the PR number from a pull request web URL
///
/// `https://github.com/acme/repo/pull/42` yields `42`. URLs without a
/// `/pull/<digits>` segment yield `None`.
pub fn parse_pr_number(url: &str) -> Option<u64> {
    RE_PR_NUMBER
        .captures_iter(url)
        .last()
        .and_then(|caps| caps[1].parse().ok())
}

/// Reviewers are requested only for a created PR with a non-empty reviewer set
pub const fn should_request_reviewers(pr_created: bool, reviewers: &[Reviewer]) -> bool {
    pr_created && !reviewers.is_empty()
}

/// Post the pull request
///
/// A non-success response becomes [`PrResult::Rejected`]; transport errors
/// are returned as `Err`.
pub async fn submit_pull_request(
    api: &dyn GitHubApi,
    repo: &RepoSpec,
    payload: &PullRequestPayload,
) -> Result<PrResult> {
    match api.create_pull_request(repo, payload).await {
        Ok(pr) => Ok(PrResult::Created {
            html_url: pr.html_url,
        }),
        Err(Error::GitHubApi { status, body }) => Ok(PrResult::Rejected { status, body }),
        Err(e) => Err(e),
    }
}

/// Request reviewers on the PR behind `pr_url`
///
/// Fails locally with [`Error::PrNumber`], without any request, when the
/// URL carries no PR number.
pub async fn assign_reviewers(
    api: &dyn GitHubApi,
    repo: &RepoSpec,
    pr_url: &str,
    reviewers: &[Reviewer],
) -> Result<u64> {
    let number = parse_pr_number(pr_url).ok_or_else(|| Error::PrNumber(pr_url.to_string()))?;
    api.request_reviewers(repo, number, reviewers).await?;
    Ok(number)
}
