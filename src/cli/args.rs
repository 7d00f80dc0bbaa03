//! CLI argument definitions using clap
//!
//! Commands:
//! - forumd serve [--config <path>] [--port <port>]
//! - forumd check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// forumd - Forum post service with hierarchical thread ordering
#[derive(Parser, Debug)]
#[command(name = "forumd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate a configuration file and its fixtures, then exit
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./forumd.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
