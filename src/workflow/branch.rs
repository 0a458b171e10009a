//! Feature branch readiness
//!
//! `Unknown -> Checked -> Existing | Created | CreateFailed`. A failed
//! creation is returned as an error and stops the workflow.

use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::types::{BranchLookup, BranchRef, RepoSpec};
use crate::workflow::{Console, Phase};
use tracing::info;

/// State of the feature branch once the branch step has run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchReadiness {
    /// Branch already existed on the remote
    Existing,
    /// Branch was created from the base branch
    Created(BranchRef),
    /// Branch is missing and would be created (dry run only)
    WouldCreate,
}

async fn fetch_base(api: &dyn GitHubApi, repo: &RepoSpec, base_branch: &str) -> Result<BranchRef> {
    api.get_branch(repo, base_branch)
        .await
        .map_err(|e| Error::BaseBranchNotFound {
            branch: base_branch.to_string(),
            reason: e.to_string(),
        })
}

/// Create `new_branch` pointing at the tip of `base_branch`
///
/// No creation request is made if the base branch lookup fails. A failed
/// creation is not rolled back.
pub async fn create_from_base(
    api: &dyn GitHubApi,
    repo: &RepoSpec,
    new_branch: &str,
    base_branch: &str,
) -> Result<BranchRef> {
    let base = fetch_base(api, repo, base_branch).await?;

    let created = api
        .create_branch(repo, new_branch, &base.sha)
        .await
        .map_err(|e| Error::BranchCreate {
            branch: new_branch.to_string(),
            reason: e.to_string(),
        })?;

    info!(branch = new_branch, sha = %created.sha, "created branch");
    Ok(created)
}

/// Make sure the feature branch exists, creating it when absent
///
/// A lookup that fails for a reason other than 404 is treated as missing,
/// with a console warning naming the failure. A dry run still reads the
/// base branch so it only reports a creation that could happen.
pub async fn ensure_branch(
    api: &dyn GitHubApi,
    console: &dyn Console,
    repo: &RepoSpec,
    feature_branch: &str,
    base_branch: &str,
    dry_run: bool,
) -> Result<BranchReadiness> {
    console.phase(Phase::CheckingBranch);
    match api.branch_exists(repo, feature_branch).await {
        BranchLookup::Exists => return Ok(BranchReadiness::Existing),
        BranchLookup::Missing => {}
        BranchLookup::Unknown(reason) => console.warn(&format!(
            "Branch lookup {reason}; treating '{feature_branch}' as missing"
        )),
    }

    if dry_run {
        let base = fetch_base(api, repo, base_branch).await?;
        let sha = short_sha(&base.sha);
        console.warn(&format!(
            "Branch '{feature_branch}' does not exist and would be created from \
             '{base_branch}' at {sha}"
        ));
        return Ok(BranchReadiness::WouldCreate);
    }

    console.warn(&format!(
        "Branch '{feature_branch}' does not exist. Creating it from '{base_branch}'..."
    ));
    console.phase(Phase::CreatingBranch);
    let created = create_from_base(api, repo, feature_branch, base_branch).await?;
    console.info(&format!(
        "Created branch '{}' at {}",
        created.name,
        short_sha(&created.sha)
    ));
    Ok(BranchReadiness::Created(created))
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
