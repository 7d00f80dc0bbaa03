//! CLI command implementations
//!
//! Boot order for `serve`:
//! 1. Configuration load and validation
//! 2. Log level
//! 3. Store creation and fixture seeding
//! 4. Post service and HTTP router
//! 5. Listener on a tokio runtime

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::forum::{FixtureSummary, Fixtures, MemoryStore, PostService, DEFAULT_MAX_PAGE_SIZE};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Listener and CORS settings
    #[serde(default)]
    pub server: HttpServerConfig,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound on `limit` for thread listings (optional, default 10000)
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Fixtures file seeding users, forums and threads.
    /// Relative paths resolve against the config file's directory.
    #[serde(default)]
    pub fixtures: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_page_size() -> usize {
    DEFAULT_MAX_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            log_level: default_log_level(),
            max_page_size: default_max_page_size(),
            fixtures: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        if let Some(fixtures) = config.fixtures.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.fixtures = Some(if fixtures.is_relative() {
                base.join(fixtures)
            } else {
                fixtures
            });
        }

        Ok(config)
    }

    /// Load from a path if one was given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if Severity::parse(&self.log_level).is_none() {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Expected trace, info, warn, error or fatal.",
                self.log_level
            )));
        }

        if self.max_page_size == 0 {
            return Err(CliError::config_error("max_page_size must be > 0"));
        }

        Ok(())
    }

    /// Parsed minimum severity
    pub fn severity(&self) -> Severity {
        Severity::parse(&self.log_level).unwrap_or(Severity::Info)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Start the HTTP API server
///
/// Blocks until the listener fails.
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    Logger::set_min_severity(config.severity());
    log_config_loaded(config_path, &config);

    let (service, _) = boot_service(&config)?;
    let server = HttpServer::with_service(config.server.clone(), Arc::new(service));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(server.start()).map_err(|e| {
        let reason = e.to_string();
        log_event_with_fields(Event::ServerFailed, &[("reason", reason.as_str())]);
        CliError::boot_failed(format!("HTTP server failed: {}", e))
    })
}

/// Validate a config file and its fixtures, printing a summary
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let (_, summary) = boot_service(&config)?;

    write_response(json!({
        "listen": config.server.socket_addr(),
        "log_level": config.severity().as_str(),
        "max_page_size": config.max_page_size,
        "fixtures": {
            "users": summary.users,
            "forums": summary.forums,
            "threads": summary.threads,
        },
    }))
}

/// Build a seeded store and the post service over it
fn boot_service(config: &Config) -> CliResult<(PostService, FixtureSummary)> {
    let store = Arc::new(MemoryStore::new());

    let summary = match &config.fixtures {
        Some(path) => {
            let summary = Fixtures::load(path)?.apply(store.as_ref())?;
            let users = summary.users.to_string();
            let forums = summary.forums.to_string();
            let threads = summary.threads.to_string();
            log_event_with_fields(
                Event::FixturesLoaded,
                &[
                    ("users", users.as_str()),
                    ("forums", forums.as_str()),
                    ("threads", threads.as_str()),
                ],
            );
            summary
        }
        None => FixtureSummary::default(),
    };

    let service = PostService::new(store).with_max_page_size(config.max_page_size);
    Ok((service, summary))
}

fn log_config_loaded(path: Option<&Path>, config: &Config) {
    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let listen = config.server.socket_addr();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("source", source.as_str()),
            ("listen", listen.as_str()),
            ("log_level", config.log_level.as_str()),
        ],
    );
}
