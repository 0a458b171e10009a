//! Test data factories
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use crate::common::mock_github::MockGitHub;
use ticket_pr::types::RepoSpec;
use ticket_pr::workflow::WorkflowOptions;

pub const BASE_SHA: &str = "abc123";

/// `acme/widgets`
pub fn widgets_repo() -> RepoSpec {
    RepoSpec::parse("acme/widgets").unwrap()
}

/// Options with every value preset, so no prompts are needed
pub fn widgets_options() -> WorkflowOptions {
    WorkflowOptions {
        repo: Some("acme/widgets".to_string()),
        ticket_id: Some("JIRA-7".to_string()),
        title: Some("Fix crash".to_string()),
        description: Some("Guard against a null layout".to_string()),
        feature_branch: Some("fix/crash".to_string()),
        base_branch: Some("main".to_string()),
        ..WorkflowOptions::default()
    }
}

/// Remote with `main` at [`BASE_SHA`], no feature branch, one team
pub fn widgets_remote() -> MockGitHub {
    MockGitHub::new()
        .with_branch("main", BASE_SHA)
        .with_collaborators(&["alice", "bob"])
        .with_teams(&["core"])
        .with_pr_url("https://github.com/acme/widgets/pull/9")
}
