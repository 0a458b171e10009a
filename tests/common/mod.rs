//! Shared test utilities

pub mod fixtures;
pub mod mock_console;
pub mod mock_github;
