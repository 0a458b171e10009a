//! Mock GitHub API for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use ticket_pr::error::{Error, Result};
use ticket_pr::github::GitHubApi;
use ticket_pr::types::{
    BranchLookup, BranchRef, CreatedPullRequest, PullRequestPayload, RepoSpec, Repository,
    Reviewer,
};

/// One recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    CurrentUser,
    ListRepositories,
    BranchExists(String),
    GetBranch(String),
    CreateBranch { branch: String, sha: String },
    ListCollaborators,
    ListTeams,
    CreatePullRequest(PullRequestPayload),
    RequestReviewers { pr_number: u64, reviewers: Vec<Reviewer> },
}

fn api_error(status: u16, body: &str) -> Error {
    Error::GitHubApi {
        status,
        body: body.to_string(),
    }
}

/// Recording mock of [`GitHubApi`]
///
/// Features:
/// - Remote branches keyed by name, updated by `create_branch`
/// - Call log for order verification
/// - Error injection per operation
pub struct MockGitHub {
    calls: Mutex<Vec<ApiCall>>,
    username: Mutex<Option<String>>,
    repositories: Mutex<Vec<String>>,
    branches: Mutex<HashMap<String, String>>,
    collaborators: Mutex<Vec<String>>,
    teams: Mutex<Vec<String>>,
    pr_url: Mutex<String>,
    // Error injection
    error_on_branch_lookup: Mutex<Option<u16>>,
    error_on_list_repos: Mutex<Option<(u16, String)>>,
    error_on_create_branch: Mutex<Option<(u16, String)>>,
    error_on_collaborators: Mutex<Option<(u16, String)>>,
    error_on_teams: Mutex<Option<(u16, String)>>,
    error_on_create_pr: Mutex<Option<(u16, String)>>,
    error_on_reviewers: Mutex<Option<(u16, String)>>,
}

impl Default for MockGitHub {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGitHub {
    /// Empty remote: no branches, no collaborators, user `octocat`
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            username: Mutex::new(Some("octocat".to_string())),
            repositories: Mutex::new(Vec::new()),
            branches: Mutex::new(HashMap::new()),
            collaborators: Mutex::new(Vec::new()),
            teams: Mutex::new(Vec::new()),
            pr_url: Mutex::new("https://github.com/acme/widgets/pull/1".to_string()),
            error_on_branch_lookup: Mutex::new(None),
            error_on_list_repos: Mutex::new(None),
            error_on_create_branch: Mutex::new(None),
            error_on_collaborators: Mutex::new(None),
            error_on_teams: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
            error_on_reviewers: Mutex::new(None),
        }
    }

    // === Setup methods ===

    pub fn with_branch(self, name: &str, sha: &str) -> Self {
        self.branches
            .lock()
            .unwrap()
            .insert(name.to_string(), sha.to_string());
        self
    }

    pub fn with_repositories(self, names: &[&str]) -> Self {
        *self.repositories.lock().unwrap() = names.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_collaborators(self, logins: &[&str]) -> Self {
        *self.collaborators.lock().unwrap() = logins.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_teams(self, slugs: &[&str]) -> Self {
        *self.teams.lock().unwrap() = slugs.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_pr_url(self, url: &str) -> Self {
        *self.pr_url.lock().unwrap() = url.to_string();
        self
    }

    // === Error injection methods ===

    pub fn fail_current_user(&self) {
        *self.username.lock().unwrap() = None;
    }

    /// Branch lookups answer with a non-404 failure status
    pub fn fail_branch_lookup(&self, status: u16) {
        *self.error_on_branch_lookup.lock().unwrap() = Some(status);
    }

    pub fn fail_list_repositories(&self, status: u16, body: &str) {
        *self.error_on_list_repos.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn fail_create_branch(&self, status: u16, body: &str) {
        *self.error_on_create_branch.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn fail_collaborators(&self, status: u16, body: &str) {
        *self.error_on_collaborators.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn fail_teams(&self, status: u16, body: &str) {
        *self.error_on_teams.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn fail_create_pr(&self, status: u16, body: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn fail_request_reviewers(&self, status: u16, body: &str) {
        *self.error_on_reviewers.lock().unwrap() = Some((status, body.to_string()));
    }

    // === Call verification methods ===

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.lock().unwrap().contains_key(name)
    }

    pub fn create_branch_calls(&self) -> usize {
        self.count(|c| matches!(c, ApiCall::CreateBranch { .. }))
    }

    pub fn create_pr_calls(&self) -> Vec<PullRequestPayload> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::CreatePullRequest(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn reviewer_calls(&self) -> Vec<(u64, Vec<Reviewer>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::RequestReviewers {
                    pr_number,
                    reviewers,
                } => Some((pr_number, reviewers)),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn injected(slot: &Mutex<Option<(u16, String)>>) -> Option<Error> {
        slot.lock()
            .unwrap()
            .as_ref()
            .map(|(status, body)| api_error(*status, body))
    }
}

#[async_trait]
impl GitHubApi for MockGitHub {
    async fn current_user(&self) -> Result<String> {
        self.record(ApiCall::CurrentUser);
        self.username
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| api_error(401, r#"{"message":"Bad credentials"}"#))
    }

    async fn list_repositories(&self) -> Result<Vec<Repository>> {
        self.record(ApiCall::ListRepositories);
        if let Some(e) = Self::injected(&self.error_on_list_repos) {
            return Err(e);
        }
        Ok(self
            .repositories
            .lock()
            .unwrap()
            .iter()
            .map(|full_name| Repository {
                full_name: full_name.clone(),
            })
            .collect())
    }

    async fn branch_exists(&self, _repo: &RepoSpec, branch: &str) -> BranchLookup {
        self.record(ApiCall::BranchExists(branch.to_string()));
        if let Some(status) = *self.error_on_branch_lookup.lock().unwrap() {
            return BranchLookup::Unknown(format!("returned {status}"));
        }
        if self.has_branch(branch) {
            BranchLookup::Exists
        } else {
            BranchLookup::Missing
        }
    }

    async fn get_branch(&self, _repo: &RepoSpec, branch: &str) -> Result<BranchRef> {
        self.record(ApiCall::GetBranch(branch.to_string()));
        self.branches
            .lock()
            .unwrap()
            .get(branch)
            .map(|sha| BranchRef {
                name: branch.to_string(),
                sha: sha.clone(),
            })
            .ok_or_else(|| api_error(404, r#"{"message":"Not Found"}"#))
    }

    async fn create_branch(&self, _repo: &RepoSpec, branch: &str, sha: &str) -> Result<BranchRef> {
        self.record(ApiCall::CreateBranch {
            branch: branch.to_string(),
            sha: sha.to_string(),
        });
        if let Some(e) = Self::injected(&self.error_on_create_branch) {
            return Err(e);
        }
        self.branches
            .lock()
            .unwrap()
            .insert(branch.to_string(), sha.to_string());
        Ok(BranchRef {
            name: branch.to_string(),
            sha: sha.to_string(),
        })
    }

    async fn list_collaborators(&self, _repo: &RepoSpec) -> Result<Vec<String>> {
        self.record(ApiCall::ListCollaborators);
        if let Some(e) = Self::injected(&self.error_on_collaborators) {
            return Err(e);
        }
        Ok(self.collaborators.lock().unwrap().clone())
    }

    async fn list_teams(&self, _repo: &RepoSpec) -> Result<Vec<String>> {
        self.record(ApiCall::ListTeams);
        if let Some(e) = Self::injected(&self.error_on_teams) {
            return Err(e);
        }
        Ok(self.teams.lock().unwrap().clone())
    }

    async fn create_pull_request(
        &self,
        _repo: &RepoSpec,
        payload: &PullRequestPayload,
    ) -> Result<CreatedPullRequest> {
        self.record(ApiCall::CreatePullRequest(payload.clone()));
        if let Some(e) = Self::injected(&self.error_on_create_pr) {
            return Err(e);
        }
        // GitHub rejects PRs whose head is missing on the remote
        if !self.has_branch(&payload.head) {
            return Err(api_error(422, r#"{"message":"Validation Failed"}"#));
        }
        Ok(CreatedPullRequest {
            html_url: self.pr_url.lock().unwrap().clone(),
        })
    }

    async fn request_reviewers(
        &self,
        _repo: &RepoSpec,
        pr_number: u64,
        reviewers: &[Reviewer],
    ) -> Result<()> {
        self.record(ApiCall::RequestReviewers {
            pr_number,
            reviewers: reviewers.to_vec(),
        });
        if let Some(e) = Self::injected(&self.error_on_reviewers) {
            return Err(e);
        }
        Ok(())
    }
}
