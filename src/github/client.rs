//! GitHub service using reqwest

use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::types::{
    BranchLookup, BranchRef, CreatedPullRequest, PullRequestPayload, RepoSpec, Repository,
    Reviewer,
};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("ticket-pr/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: &str = "100";

#[derive(Deserialize)]
struct User {
    login: String,
}

#[derive(Deserialize)]
struct Collaborator {
    login: String,
}

#[derive(Deserialize)]
struct Team {
    slug: String,
}

#[derive(Clone, Deserialize)]
struct GitRef {
    #[serde(rename = "ref")]
    ref_name: String,
    object: GitObject,
}

#[derive(Clone, Deserialize)]
struct GitObject {
    sha: String,
}

/// `git/refs/heads/<name>` answers with an array when `<name>` is only a
/// prefix of existing branches.
#[derive(Clone, Deserialize)]
#[serde(untagged)]
enum RefLookup {
    One(GitRef),
    Many(Vec<GitRef>),
}

impl RefLookup {
    fn exact(self, branch: &str) -> Option<GitRef> {
        let full = format!("refs/heads/{branch}");
        match self {
            Self::One(r) if r.ref_name == full => Some(r),
            Self::One(_) => None,
            Self::Many(refs) => refs.into_iter().find(|r| r.ref_name == full),
        }
    }
}

#[derive(Serialize)]
struct CreateRefPayload<'a> {
    #[serde(rename = "ref")]
    ref_name: String,
    sha: &'a str,
}

#[derive(Serialize)]
struct ReviewRequestPayload<'a> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reviewers: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    team_reviewers: Vec<&'a str>,
}

/// GitHub REST client holding the credential and API root
pub struct GitHubClient {
    client: Client,
    token: String,
    base_url: Url,
}

impl GitHubClient {
    /// Create a client for api.github.com
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Create a client for another API root (GitHub Enterprise, tests)
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let mut root = base_url.trim().to_string();
        if !root.ends_with('/') {
            root.push('/');
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V3));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            token: token.to_string(),
            base_url: Url::parse(&root)?,
        })
    }

    fn api_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn get(&self, path: &str) -> Result<RequestBuilder> {
        debug!(method = "GET", path, "github request");
        Ok(self.client.get(self.api_url(path)?).bearer_auth(&self.token))
    }

    fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<RequestBuilder> {
        debug!(method = "POST", path, "github request");
        Ok(self
            .client
            .post(self.api_url(path)?)
            .bearer_auth(&self.token)
            .json(body))
    }

    fn ref_path(repo: &RepoSpec, branch: &str) -> String {
        let encoded: Vec<String> = branch
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("repos/{}/git/refs/heads/{}", repo.full_name(), encoded.join("/"))
    }
}

/// Turn a non-success response into [`Error::GitHubApi`] with the raw body
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), "github request failed");
    Err(Error::GitHubApi {
        status: status.as_u16(),
        body,
    })
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = check_status(request.send().await?).await?;
    Ok(response.json().await?)
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn current_user(&self) -> Result<String> {
        let user: User = send_json(self.get("user")?).await?;
        Ok(user.login)
    }

    async fn list_repositories(&self) -> Result<Vec<Repository>> {
        send_json(self.get("user/repos")?.query(&[("per_page", PER_PAGE)])).await
    }

    async fn branch_exists(&self, repo: &RepoSpec, branch: &str) -> BranchLookup {
        let request = match self.get(&Self::ref_path(repo, branch)) {
            Ok(request) => request,
            Err(e) => return BranchLookup::Unknown(format!("could not be built: {e}")),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(branch, error = %e, "branch lookup failed");
                return BranchLookup::Unknown(format!("failed: {e}"));
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return BranchLookup::Missing;
        }
        if !status.is_success() {
            warn!(branch, status = status.as_u16(), "branch lookup was not a 404");
            return BranchLookup::Unknown(format!("returned {}", status.as_u16()));
        }

        match response.json::<RefLookup>().await {
            Ok(lookup) if lookup.clone().exact(branch).is_some() => BranchLookup::Exists,
            Ok(_) => {
                debug!(branch, "only prefix matches found");
                BranchLookup::Missing
            }
            Err(_) => BranchLookup::Exists,
        }
    }

    async fn get_branch(&self, repo: &RepoSpec, branch: &str) -> Result<BranchRef> {
        let lookup: RefLookup = send_json(self.get(&Self::ref_path(repo, branch))?).await?;
        let git_ref = lookup.exact(branch).ok_or_else(|| Error::GitHubApi {
            status: 404,
            body: format!("no ref named refs/heads/{branch}"),
        })?;

        Ok(BranchRef {
            name: branch.to_string(),
            sha: git_ref.object.sha,
        })
    }

    async fn create_branch(&self, repo: &RepoSpec, branch: &str, sha: &str) -> Result<BranchRef> {
        let payload = CreateRefPayload {
            ref_name: format!("refs/heads/{branch}"),
            sha,
        };
        let path = format!("repos/{}/git/refs", repo.full_name());
        let created: GitRef = send_json(self.post(&path, &payload)?).await?;

        Ok(BranchRef {
            name: branch.to_string(),
            sha: created.object.sha,
        })
    }

    async fn list_collaborators(&self, repo: &RepoSpec) -> Result<Vec<String>> {
        let path = format!("repos/{}/collaborators", repo.full_name());
        let users: Vec<Collaborator> =
            send_json(self.get(&path)?.query(&[("per_page", PER_PAGE)])).await?;
        Ok(users.into_iter().map(|u| u.login).collect())
    }

    async fn list_teams(&self, repo: &RepoSpec) -> Result<Vec<String>> {
        let path = format!("repos/{}/teams", repo.full_name());
        let teams: Vec<Team> = send_json(self.get(&path)?.query(&[("per_page", PER_PAGE)])).await?;
        Ok(teams.into_iter().map(|t| t.slug).collect())
    }

    async fn create_pull_request(
        &self,
        repo: &RepoSpec,
        payload: &PullRequestPayload,
    ) -> Result<CreatedPullRequest> {
        let path = format!("repos/{}/pulls", repo.full_name());
        send_json(self.post(&path, payload)?).await
    }

    async fn request_reviewers(
        &self,
        repo: &RepoSpec,
        pr_number: u64,
        reviewers: &[Reviewer],
    ) -> Result<()> {
        let payload = ReviewRequestPayload {
            reviewers: reviewers
                .iter()
                .filter_map(|r| match r {
                    Reviewer::User(login) => Some(login.as_str()),
                    Reviewer::Team(_) => None,
                })
                .collect(),
            team_reviewers: reviewers
                .iter()
                .filter_map(|r| match r {
                    Reviewer::Team(slug) => Some(slug.as_str()),
                    Reviewer::User(_) => None,
                })
                .collect(),
        };
        let path = format!(
            "repos/{}/pulls/{pr_number}/requested_reviewers",
            repo.full_name()
        );
        check_status(self.post(&path, &payload)?.send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_path_keeps_slashes() {
        let repo = RepoSpec::parse("acme/widgets").unwrap();
        assert_eq!(
            GitHubClient::ref_path(&repo, "fix/crash"),
            "repos/acme/widgets/git/refs/heads/fix/crash"
        );
    }

    #[test]
    fn test_ref_path_encodes_segments() {
        let repo = RepoSpec::parse("acme/widgets").unwrap();
        assert_eq!(
            GitHubClient::ref_path(&repo, "feat/a b#1"),
            "repos/acme/widgets/git/refs/heads/feat/a%20b%231"
        );
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let client = GitHubClient::with_base_url("t", "https://ghe.example.com/api/v3").unwrap();
        assert_eq!(
            client.api_url("user").unwrap().as_str(),
            "https://ghe.example.com/api/v3/user"
        );
    }

    #[test]
    fn test_ref_lookup_prefers_exact_match() {
        let json = serde_json::json!([
            { "ref": "refs/heads/fix/crash-old", "object": { "sha": "aaa" } },
            { "ref": "refs/heads/fix/crash", "object": { "sha": "bbb" } }
        ]);
        let lookup: RefLookup = serde_json::from_value(json).unwrap();
        assert_eq!(lookup.exact("fix/crash").unwrap().object.sha, "bbb");
    }

    #[test]
    fn test_ref_lookup_prefix_only_is_not_a_match() {
        let json = serde_json::json!([
            { "ref": "refs/heads/fix/crash-old", "object": { "sha": "aaa" } }
        ]);
        let lookup: RefLookup = serde_json::from_value(json).unwrap();
        assert!(lookup.exact("fix/crash").is_none());
    }
}
