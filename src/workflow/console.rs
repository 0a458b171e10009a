//! Console trait for interface-agnostic prompts and status
//!
//! The workflow never prints or reads stdin directly; the CLI supplies a
//! terminal implementation and tests supply scripted answers.

use crate::error::Result;
use std::fmt;

/// Workflow phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resolving the target repository
    ResolvingRepository,
    /// Looking up the authenticated user
    IdentifyingUser,
    /// Checking whether the feature branch exists
    CheckingBranch,
    /// Creating the feature branch from the base branch
    CreatingBranch,
    /// Fetching collaborators and teams
    FetchingMetadata,
    /// Opening the pull request
    CreatingPr,
    /// Requesting reviews
    RequestingReviewers,
    /// Workflow finished
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ResolvingRepository => "Resolving repository",
            Self::IdentifyingUser => "Identifying user",
            Self::CheckingBranch => "Checking feature branch",
            Self::CreatingBranch => "Creating feature branch",
            Self::FetchingMetadata => "Fetching assignees and reviewers",
            Self::CreatingPr => "Creating pull request",
            Self::RequestingReviewers => "Requesting reviewers",
            Self::Complete => "Done",
        };
        f.write_str(text)
    }
}

/// Operator-facing console
pub trait Console: Send + Sync {
    /// Free-text prompt; an empty answer yields `default` when given
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Single choice from `items`, returning the chosen item
    fn select(&self, prompt: &str, items: &[String]) -> Result<String>;

    /// Called when entering a new phase
    fn phase(&self, phase: Phase);

    /// Informational status line
    fn info(&self, message: &str);

    /// Warning status line
    fn warn(&self, message: &str);

    /// Error status line
    fn error(&self, message: &str);
}
