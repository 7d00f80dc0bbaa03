//! CLI module for forumd
//!
//! Provides command-line interface for:
//! - serve: Load config and fixtures, run the HTTP API
//! - check-config: Validate config and fixtures without serving

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check_config, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_response, write_response_to};
