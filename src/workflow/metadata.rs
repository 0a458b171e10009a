//! Default assignees and reviewers
//!
//! Both lookups are best effort: a failed request yields an empty list and a
//! warning, never an aborted run.

use crate::github::GitHubApi;
use crate::types::{CollaborationSet, RepoSpec, Reviewer};
use crate::workflow::{Console, Phase, StepOutcome};

/// Collaborator logins as default assignees
pub async fn default_assignees(api: &dyn GitHubApi, repo: &RepoSpec) -> StepOutcome<Vec<String>> {
    StepOutcome::best_effort(api.list_collaborators(repo).await)
}

/// Team slugs as default reviewers
pub async fn default_reviewers(
    api: &dyn GitHubApi,
    repo: &RepoSpec,
) -> StepOutcome<Vec<Reviewer>> {
    StepOutcome::best_effort(api.list_teams(repo).await)
        .map(|slugs| slugs.into_iter().map(Reviewer::Team).collect())
}

/// Parse a `--reviewer` value: `team:<slug>` or a user login
pub fn parse_reviewer(value: &str) -> Reviewer {
    let value = value.trim().trim_start_matches('@');
    value.strip_prefix("team:").map_or_else(
        || Reviewer::User(value.to_string()),
        |slug| Reviewer::Team(slug.to_string()),
    )
}

/// Build the collaboration set
///
/// Explicit assignees or reviewers replace the discovered list and skip
/// the corresponding request.
pub async fn fetch_collaboration(
    api: &dyn GitHubApi,
    console: &dyn Console,
    repo: &RepoSpec,
    assignees: &[String],
    reviewers: &[String],
) -> CollaborationSet {
    console.phase(Phase::FetchingMetadata);

    let assignees = if assignees.is_empty() {
        default_assignees(api, repo)
            .await
            .settle_best_effort(console, "collaborators")
    } else {
        assignees.to_vec()
    };

    let reviewers = if reviewers.is_empty() {
        default_reviewers(api, repo)
            .await
            .settle_best_effort(console, "teams")
    } else {
        reviewers.iter().map(|r| parse_reviewer(r)).collect()
    };

    CollaborationSet {
        assignees,
        reviewers,
    }
}
