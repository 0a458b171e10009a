//! Create command - interactive PR creation

use crate::cli::console::TerminalConsole;
use crate::cli::style::{Stream, Stylize, check, hyperlink_url};
use anstream::println;
use clap::Args;
use std::path::PathBuf;
use ticket_pr::auth::get_github_auth;
use ticket_pr::error::Result;
use ticket_pr::github::GitHubClient;
use ticket_pr::template::Template;
use ticket_pr::workflow::{BranchReadiness, ReviewerOutcome, WorkflowOptions, run_workflow};
use tracing::debug;

/// Flags for PR creation; anything omitted is prompted for
#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Repository as owner/name (chosen from your repositories if omitted)
    #[arg(short, long, env = "TICKET_PR_REPO")]
    pub repo: Option<String>,

    /// Ticket ID, e.g. JIRA-7
    #[arg(short, long)]
    pub ticket: Option<String>,

    /// PR title (without ticket prefix)
    #[arg(long)]
    pub title: Option<String>,

    /// PR description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Feature branch (created from the base branch if missing)
    #[arg(long)]
    pub head: Option<String>,

    /// Base branch [prompted, default: main]
    #[arg(short, long)]
    pub base: Option<String>,

    /// Assignee login; repeatable. Replaces the collaborator list
    #[arg(long = "assignee")]
    pub assignees: Vec<String>,

    /// Reviewer login or team:<slug>; repeatable. Replaces the team list
    #[arg(long = "reviewer")]
    pub reviewers: Vec<String>,

    /// PR body template file using {placeholder} markers
    #[arg(long, env = "TICKET_PR_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Dry run - show what would be done without making changes
    #[arg(long)]
    pub dry_run: bool,
}

impl CreateArgs {
    fn into_options(self, template: Template) -> WorkflowOptions {
        WorkflowOptions {
            repo: self.repo,
            ticket_id: self.ticket,
            title: self.title,
            description: self.description,
            feature_branch: self.head,
            base_branch: self.base,
            assignees: self.assignees,
            reviewers: self.reviewers,
            template,
            dry_run: self.dry_run,
        }
    }
}

/// Run the create command
///
/// The token and template are checked before any request is made.
pub async fn run_create(args: CreateArgs, token: Option<&str>, api_url: &str) -> Result<()> {
    let auth = get_github_auth(token).await?;
    debug!(source = ?auth.source, api_url, "using GitHub token");

    let template = match &args.template {
        Some(path) => Template::from_file(path)?,
        None => Template::builtin(),
    };

    let client = GitHubClient::with_base_url(&auth.token, api_url)?;
    let console = TerminalConsole::new();
    let report = run_workflow(&client, &console, &args.into_options(template)).await?;

    if report.dry_run {
        return Ok(());
    }

    println!();
    if let BranchReadiness::Created(branch) = &report.branch {
        println!("{} Branch {} created", check(), branch.name.accent());
    }
    if let Some(url) = &report.pr_url {
        println!(
            "{} {} {}",
            check(),
            report.payload.title.emphasis(),
            hyperlink_url(Stream::Stdout, url)
        );
    }
    match &report.reviewers {
        ReviewerOutcome::Assigned(number) => {
            let count = report.payload.reviewers.len();
            println!(
                "{} {} {count} reviewer{} on #{number}",
                check(),
                "Requested".success(),
                if count == 1 { "" } else { "s" }
            );
        }
        ReviewerOutcome::NotRequested => {
            println!("{}", "No reviewers requested".muted());
        }
        ReviewerOutcome::Failed(_) => {}
    }

    Ok(())
}
