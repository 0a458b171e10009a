//! Pull request workflow
//!
//! Runs the steps in order, each depending on the ones before it:
//! 1. Input - ticket, title, description and branches
//! 2. Repository - explicit or chosen from the user's repositories
//! 3. Branch - make sure the feature branch exists on GitHub
//! 4. Metadata - default assignees and reviewers (best effort)
//! 5. Template - render the PR body
//! 6. Submit - open the PR, then request reviewers

mod branch;
mod console;
mod execute;
mod input;
mod metadata;
mod outcome;
mod submit;

pub use branch::{BranchReadiness, create_from_base, ensure_branch};
pub use console::{Console, Phase};
pub use execute::{WorkflowOptions, WorkflowReport, run_workflow};
pub use input::{
    Presets, TicketInput, UNKNOWN_USER, collect_input, lookup_username, resolve_repository,
};
pub use metadata::{default_assignees, default_reviewers, fetch_collaboration, parse_reviewer};
pub use outcome::StepOutcome;
pub use submit::{
    PrResult, ReviewerOutcome, assign_reviewers, parse_pr_number, should_request_reviewers,
    submit_pull_request,
};
