//! Auth command - test and explain authentication

use crate::cli::style::{Stylize, check};
use anstream::println;
use ticket_pr::auth::get_github_auth;
use ticket_pr::error::Result;
use ticket_pr::github::{GitHubApi, GitHubClient};

/// Run the auth test command
pub async fn run_auth_test(token: Option<&str>, api_url: &str) -> Result<()> {
    println!("Testing GitHub authentication...");
    let config = get_github_auth(token).await?;
    let client = GitHubClient::with_base_url(&config.token, api_url)?;
    let username = client.current_user().await?;
    println!("{} Authenticated as: {}", check(), username.accent());
    println!("Token source: {:?}", config.source);
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup() {
    println!("{}", "GitHub Authentication Setup".emphasis());
    println!("===========================");
    println!();
    println!("Option 1: Environment variable");
    println!("  Set GITHUB_TOKEN or GH_TOKEN to a token with repo scope");
    println!();
    println!("Option 2: Command line");
    println!("  Pass --token <TOKEN>");
    println!();
    println!("Option 3: GitHub CLI");
    println!("  Install: https://cli.github.com/");
    println!("  Run: gh auth login");
    println!();
    println!("For GitHub Enterprise:");
    println!("  Set GITHUB_API_URL or pass --api-url https://<host>/api/v3");
}

/// Wrapper for auth commands
pub async fn run_auth(test: bool, token: Option<&str>, api_url: &str) -> Result<()> {
    if test {
        run_auth_test(token, api_url).await
    } else {
        run_auth_setup();
        Ok(())
    }
}
