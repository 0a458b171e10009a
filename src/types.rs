//! Core types for ticket-pr

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static RE_SSH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^git@[^:]+:([^/]+)/([^/]+?)(?:\.git)?/?$").expect("hardcoded regex is valid")
});
static RE_HTTPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^/]+/([^/]+)/([^/]+?)(?:\.git)?/?$").expect("hardcoded regex is valid")
});
static RE_SHORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$").expect("hardcoded regex is valid")
});

/// A GitHub repository identifier (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoSpec {
    /// Parse `owner/name`, an HTTPS clone URL or an SSH remote
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let caps = RE_SHORT
            .captures(input)
            .or_else(|| RE_HTTPS.captures(input))
            .or_else(|| RE_SSH.captures(input))
            .ok_or_else(|| {
                Error::InvalidInput(format!("expected owner/name repository, got '{input}'"))
            })?;

        let (owner, name) = (&caps[1], &caps[2]);
        if [owner, name].iter().any(|part| matches!(*part, "." | "..")) {
            return Err(Error::InvalidInput(format!(
                "expected owner/name repository, got '{input}'"
            )));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// `owner/name` form used in API paths
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A repository visible to the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// `owner/name`
    pub full_name: String,
}

/// A branch reference on the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Branch name (without `refs/heads/`)
    pub name: String,
    /// Commit SHA the branch points at
    pub sha: String,
}

/// Result of looking up a branch on the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchLookup {
    /// The exact ref exists
    Exists,
    /// GitHub answered 404, or only prefix matches
    Missing,
    /// The lookup failed for another reason (auth, server error, transport)
    Unknown(String),
}

impl BranchLookup {
    /// Whether the branch is known to exist; `Unknown` counts as missing
    pub const fn exists(&self) -> bool {
        matches!(self, Self::Exists)
    }
}

/// A requested reviewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reviewer {
    /// Individual user login
    User(String),
    /// Team slug
    Team(String),
}

impl Reviewer {
    /// Login or slug
    pub fn id(&self) -> &str {
        match self {
            Self::User(id) | Self::Team(id) => id,
        }
    }
}

impl fmt::Display for Reviewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(login) => write!(f, "@{login}"),
            Self::Team(slug) => write!(f, "team:{slug}"),
        }
    }
}

/// Default assignees and reviewers for a pull request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollaborationSet {
    /// Assignee logins
    pub assignees: Vec<String>,
    /// Reviewers (users and teams)
    pub reviewers: Vec<Reviewer>,
}

/// Everything known about the PR to open, built once per run
#[derive(Debug, Clone)]
pub struct Session {
    /// Target repository
    pub repo: RepoSpec,
    /// Ticket identifier, e.g. `JIRA-7`
    pub ticket_id: String,
    /// Human title (without ticket prefix)
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Feature branch (PR head)
    pub feature_branch: String,
    /// Base branch (PR target)
    pub base_branch: String,
    /// Authenticated GitHub login
    pub username: String,
}

impl Session {
    /// Title submitted to GitHub: `[ticket] - title`
    pub fn pr_title(&self) -> String {
        format_pr_title(&self.ticket_id, &self.title)
    }

    /// Web compare URL between base and feature branch
    pub fn compare_url(&self) -> String {
        format!(
            "https://github.com/{}/compare/{}...{}",
            self.repo, self.base_branch, self.feature_branch
        )
    }
}

/// Format a PR title from a ticket id and title
pub fn format_pr_title(ticket_id: &str, title: &str) -> String {
    format!("[{ticket_id}] - {title}")
}

/// Body of `POST /repos/{repo}/pulls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestPayload {
    /// PR title
    pub title: String,
    /// Head (feature) branch
    pub head: String,
    /// Base branch
    pub base: String,
    /// Rendered description
    pub body: String,
    /// Assignee logins
    pub assignees: Vec<String>,
    /// Reviewer logins and team slugs
    pub reviewers: Vec<Reviewer>,
}

impl PullRequestPayload {
    /// Build the payload for a session
    pub fn new(session: &Session, body: String, collaboration: &CollaborationSet) -> Self {
        Self {
            title: session.pr_title(),
            head: session.feature_branch.clone(),
            base: session.base_branch.clone(),
            body,
            assignees: collaboration.assignees.clone(),
            reviewers: collaboration.reviewers.clone(),
        }
    }
}

/// A pull request as returned by the creation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedPullRequest {
    /// Web URL of the pull request
    pub html_url: String,
}
