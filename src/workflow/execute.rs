//! Workflow execution
//!
//! Drives the steps in order and reports progress through the console.

use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::template::Template;
use crate::types::{PullRequestPayload, Session};
use crate::workflow::{
    BranchReadiness, Console, Phase, PrResult, Presets, ReviewerOutcome, assign_reviewers,
    collect_input, ensure_branch, fetch_collaboration, lookup_username, resolve_repository,
    should_request_reviewers, submit_pull_request,
};
use tracing::info;

/// Everything the operator supplied up front
#[derive(Debug, Clone, Default)]
pub struct WorkflowOptions {
    /// `owner/name`; prompts for a choice when `None`
    pub repo: Option<String>,
    /// Ticket identifier
    pub ticket_id: Option<String>,
    /// PR title
    pub title: Option<String>,
    /// PR description
    pub description: Option<String>,
    /// Feature branch
    pub feature_branch: Option<String>,
    /// Base branch (defaults to `main` when prompted)
    pub base_branch: Option<String>,
    /// Assignees replacing the collaborator list
    pub assignees: Vec<String>,
    /// Reviewers replacing the team list (`team:<slug>` for teams)
    pub reviewers: Vec<String>,
    /// PR body template
    pub template: Template,
    /// Stop before creating anything
    pub dry_run: bool,
}

impl WorkflowOptions {
    fn presets(&self) -> Presets<'_> {
        Presets {
            ticket_id: self.ticket_id.as_deref(),
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            feature_branch: self.feature_branch.as_deref(),
            base_branch: self.base_branch.as_deref(),
        }
    }
}

/// What the workflow did
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    /// Resolved session
    pub session: Session,
    /// Feature branch state
    pub branch: BranchReadiness,
    /// Payload that was (or would have been) submitted
    pub payload: PullRequestPayload,
    /// Web URL of the created PR
    pub pr_url: Option<String>,
    /// Reviewer request result
    pub reviewers: ReviewerOutcome,
    /// Whether this was a dry run
    pub dry_run: bool,
}

/// Run the PR workflow
///
/// Fatal failures are returned as `Err` without being printed; the caller
/// reports them once. The caller also announces the created PR from
/// [`WorkflowReport::pr_url`]. Degraded steps and reviewer failures are reported on
/// the console and the run continues.
pub async fn run_workflow(
    api: &dyn GitHubApi,
    console: &dyn Console,
    options: &WorkflowOptions,
) -> Result<WorkflowReport> {
    let input = collect_input(console, options.presets())?;

    console.phase(Phase::ResolvingRepository);
    let repo = resolve_repository(api, console, options.repo.as_deref()).await?;

    console.phase(Phase::IdentifyingUser);
    let username = lookup_username(api).await.settle(console, "username")?;
    let session = input.into_session(repo, username);
    info!(
        repo = %session.repo,
        head = %session.feature_branch,
        base = %session.base_branch,
        "session ready"
    );

    let branch = ensure_branch(
        api,
        console,
        &session.repo,
        &session.feature_branch,
        &session.base_branch,
        options.dry_run,
    )
    .await?;

    let collaboration = fetch_collaboration(
        api,
        console,
        &session.repo,
        &options.assignees,
        &options.reviewers,
    )
    .await;

    let body = options.template.render_session(&session);
    let payload = PullRequestPayload::new(&session, body, &collaboration);

    let mut report = WorkflowReport {
        session,
        branch,
        payload,
        pr_url: None,
        reviewers: ReviewerOutcome::NotRequested,
        dry_run: options.dry_run,
    };

    if options.dry_run {
        report_dry_run(console, &report);
        console.phase(Phase::Complete);
        return Ok(report);
    }

    console.phase(Phase::CreatingPr);
    let result = submit_pull_request(api, &report.session.repo, &report.payload).await?;
    let request_reviewers = should_request_reviewers(
        matches!(result, PrResult::Created { .. }),
        &report.payload.reviewers,
    );
    let pr_url = match result {
        PrResult::Created { html_url } => html_url,
        PrResult::Rejected { status, body } => {
            return Err(Error::PullRequestRejected { status, body });
        }
    };
    info!(url = %pr_url, "pull request created");

    if request_reviewers {
        console.phase(Phase::RequestingReviewers);
        report.reviewers =
            match assign_reviewers(api, &report.session.repo, &pr_url, &report.payload.reviewers)
                .await
            {
                Ok(number) => {
                    console.info(&format!("Reviewers assigned to PR #{number}"));
                    ReviewerOutcome::Assigned(number)
                }
                Err(e) => {
                    console.error(&format!("Failed to assign reviewers: {e}"));
                    ReviewerOutcome::Failed(e.to_string())
                }
            };
    }

    report.pr_url = Some(pr_url);
    console.phase(Phase::Complete);
    Ok(report)
}

/// Report what would be done in a dry run
fn report_dry_run(console: &dyn Console, report: &WorkflowReport) {
    let payload = &report.payload;
    console.info("Dry run - no changes will be made");
    if report.branch == BranchReadiness::WouldCreate {
        console.info(&format!(
            "Would create branch '{}' from '{}'",
            payload.head, payload.base
        ));
    }
    console.info(&format!(
        "Would create PR in {}: {} ({} -> {})",
        report.session.repo, payload.title, payload.head, payload.base
    ));
    if !payload.assignees.is_empty() {
        console.info(&format!("  assignees: {}", payload.assignees.join(", ")));
    }
    if !payload.reviewers.is_empty() {
        let reviewers: Vec<String> = payload.reviewers.iter().map(ToString::to_string).collect();
        console.info(&format!("  reviewers: {}", reviewers.join(", ")));
    }
    console.info(&payload.body);
}
