//! CLI commands
//!
//! Command implementations for the `ticket-pr` binary.

mod auth;
mod console;
mod create;
mod style;

pub use auth::run_auth;
pub use create::{CreateArgs, run_create};
pub use style::Stylize;
