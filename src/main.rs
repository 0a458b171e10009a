//! ticket-pr - GitHub pull requests from tickets
//!
//! CLI binary that walks through creating a pull request for a ticket.

use anstream::eprintln;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use ticket_pr::github::DEFAULT_API_URL;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Stylize;

#[derive(Parser)]
#[command(name = "ticket-pr")]
#[command(about = "Create a GitHub pull request for a ticket")]
#[command(version)]
struct Cli {
    /// GitHub token (defaults to GITHUB_TOKEN, GH_TOKEN, then `gh auth token`)
    #[arg(long, global = true)]
    token: Option<String>,

    /// GitHub API root
    #[arg(long, global = true, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    create: cli::CreateArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ticket_pr=debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let token = cli.token.as_deref();

    match cli.command {
        None => {
            // Default: interactive PR creation
            cli::run_create(cli.create, token, &cli.api_url).await?;
        }
        Some(Commands::Auth { action }) => {
            cli::run_auth(matches!(action, AuthAction::Test), token, &cli.api_url).await?;
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err:#}", "error".error());
            ExitCode::FAILURE
        }
    }
}
