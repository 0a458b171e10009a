//! Session input and repository resolution

use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::types::{RepoSpec, Session};
use crate::workflow::{Console, StepOutcome};

/// Username recorded when `GET /user` fails
pub const UNKNOWN_USER: &str = "unknown_user";

const DEFAULT_BASE_BRANCH: &str = "main";

/// Ticket details collected from flags and prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketInput {
    /// Ticket identifier
    pub ticket_id: String,
    /// PR title without ticket prefix
    pub title: String,
    /// Free-text description (may be empty)
    pub description: String,
    /// Feature branch
    pub feature_branch: String,
    /// Base branch
    pub base_branch: String,
}

impl TicketInput {
    /// Combine with the resolved repository and user
    pub fn into_session(self, repo: RepoSpec, username: String) -> Session {
        Session {
            repo,
            ticket_id: self.ticket_id,
            title: self.title,
            description: self.description,
            feature_branch: self.feature_branch,
            base_branch: self.base_branch,
            username,
        }
    }
}

/// Values already supplied on the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct Presets<'a> {
    /// `--ticket`
    pub ticket_id: Option<&'a str>,
    /// `--title`
    pub title: Option<&'a str>,
    /// `--description`
    pub description: Option<&'a str>,
    /// `--head`
    pub feature_branch: Option<&'a str>,
    /// `--base`
    pub base_branch: Option<&'a str>,
}

fn ask(
    console: &dyn Console,
    prompt: &str,
    preset: Option<&str>,
    default: Option<&str>,
) -> Result<String> {
    // A preset is final, even when empty
    if let Some(value) = preset.map(str::trim) {
        let value = if value.is_empty() {
            default.unwrap_or_default()
        } else {
            value
        };
        return Ok(value.to_string());
    }

    let answer = console.input(prompt, default)?.trim().to_string();
    match default {
        Some(d) if answer.is_empty() => Ok(d.to_string()),
        _ => Ok(answer),
    }
}

fn require(value: String, what: &str) -> Result<String> {
    if value.is_empty() {
        Err(Error::InvalidInput(format!("{what} must not be empty")))
    } else {
        Ok(value)
    }
}

/// Collect ticket details, prompting for anything not preset
pub fn collect_input(console: &dyn Console, presets: Presets<'_>) -> Result<TicketInput> {
    let ticket_id = require(
        ask(console, "Enter Ticket ID", presets.ticket_id, None)?,
        "ticket ID",
    )?;
    let title = require(ask(console, "Enter PR Title", presets.title, None)?, "PR title")?;
    let description = ask(console, "Enter Description", presets.description, None)?;
    let feature_branch = require(
        ask(console, "Enter Feature Branch", presets.feature_branch, None)?,
        "feature branch",
    )?;
    let base_branch = ask(
        console,
        "Enter Base Branch",
        presets.base_branch,
        Some(DEFAULT_BASE_BRANCH),
    )?;

    if feature_branch == base_branch {
        return Err(Error::InvalidInput(format!(
            "feature branch and base branch are both '{base_branch}'"
        )));
    }

    Ok(TicketInput {
        ticket_id,
        title,
        description,
        feature_branch,
        base_branch,
    })
}

/// Resolve the target repository
///
/// An explicit value is parsed as-is. Otherwise the user's repositories are
/// listed for selection; an empty list or failed lookup is fatal.
pub async fn resolve_repository(
    api: &dyn GitHubApi,
    console: &dyn Console,
    explicit: Option<&str>,
) -> Result<RepoSpec> {
    if let Some(repo) = explicit.map(str::trim).filter(|r| !r.is_empty()) {
        return RepoSpec::parse(repo);
    }

    let repos = StepOutcome::required(api.list_repositories().await)
        .into_result()
        .map_err(|e| Error::RepositoryUnresolved(format!("listing repositories failed: {e}")))?;

    if repos.is_empty() {
        return Err(Error::RepositoryUnresolved(
            "no repositories are visible to this token".to_string(),
        ));
    }

    let names: Vec<String> = repos.into_iter().map(|r| r.full_name).collect();
    let chosen = console.select("Select your GitHub repository", &names)?;
    RepoSpec::parse(&chosen)
}

/// Look up the authenticated login, degrading to [`UNKNOWN_USER`]
pub async fn lookup_username(api: &dyn GitHubApi) -> StepOutcome<String> {
    StepOutcome::best_effort_or(api.current_user().await, UNKNOWN_USER.to_string())
}
