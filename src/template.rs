//! PR description template
//!
//! Templates use `{placeholder}` markers. Substitution is a single pass,
//! so values containing braces are inserted literally and never expanded.

use crate::error::{Error, Result};
use crate::types::Session;
use std::path::Path;

/// Layout used when no `--template` file is given
pub const BUILTIN_TEMPLATE: &str = "\
**PR Title:** [#{ticket_id}] - {title}

**Description:**
{description}

**Feature Branch:** {branch}

**PR URL:** {compare_url}

**Submitted by:** {username}";

/// Values substituted into a template
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    /// Ticket identifier
    pub ticket_id: &'a str,
    /// PR title without ticket prefix
    pub title: &'a str,
    /// Free-text description
    pub description: &'a str,
    /// Compare URL for base...feature
    pub compare_url: &'a str,
    /// Submitting user
    pub username: &'a str,
    /// Feature branch
    pub branch: &'a str,
    /// Base branch
    pub base_branch: &'a str,
    /// `owner/name`
    pub repo: &'a str,
}

impl TemplateContext<'_> {
    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "ticket_id" => Some(self.ticket_id),
            "title" => Some(self.title),
            "description" => Some(self.description),
            "compare_url" => Some(self.compare_url),
            "username" => Some(self.username),
            "branch" => Some(self.branch),
            "base_branch" => Some(self.base_branch),
            "repo" => Some(self.repo),
            _ => None,
        }
    }
}

/// A PR description template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Default for Template {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Template {
    /// The built-in layout
    pub fn builtin() -> Self {
        Self {
            source: BUILTIN_TEMPLATE.to_string(),
        }
    }

    /// Template from a string
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Load a template file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::Template(format!("{}: {e}", path.display())))?;
        if source.trim().is_empty() {
            return Err(Error::Template(format!("{} is empty", path.display())));
        }
        Ok(Self { source })
    }

    /// Render with the given values
    ///
    /// Never fails: unknown placeholders and unmatched braces are copied
    /// through unchanged.
    pub fn render(&self, ctx: &TemplateContext<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + 256);
        let mut rest = self.source.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let replaced = after
                .find('}')
                .and_then(|close| ctx.lookup(&after[..close]).map(|value| (value, close)));

            if let Some((value, close)) = replaced {
                out.push_str(value);
                rest = &after[close + 1..];
            } else {
                out.push('{');
                rest = after;
            }
        }
        out.push_str(rest);
        out
    }

    /// Render the PR body for a session
    pub fn render_session(&self, session: &Session) -> String {
        let compare_url = session.compare_url();
        let repo = session.repo.full_name();
        self.render(&TemplateContext {
            ticket_id: &session.ticket_id,
            title: &session.title,
            description: &session.description,
            compare_url: &compare_url,
            username: &session.username,
            branch: &session.feature_branch,
            base_branch: &session.base_branch,
            repo: &repo,
        })
    }
}

/// Render the built-in PR body
pub fn render_pr_body(
    ticket_id: &str,
    title: &str,
    description: &str,
    compare_url: &str,
    username: &str,
    branch: &str,
) -> String {
    Template::builtin().render(&TemplateContext {
        ticket_id,
        title,
        description,
        compare_url,
        username,
        branch,
        base_branch: "",
        repo: "",
    })
}
