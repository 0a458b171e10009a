//! ticket-pr - GitHub pull requests from tickets
//!
//! Library behind the `ticket-pr` binary. The workflow collects ticket
//! details, makes sure the feature branch exists on GitHub, renders a PR
//! description and submits the pull request with default assignees and
//! reviewers.

pub mod auth;
pub mod error;
pub mod github;
pub mod template;
pub mod types;
pub mod workflow;
