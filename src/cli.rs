//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use collab_sync::config::HostConfig;
use collab_sync::output::OutputConfig;

use crate::commands;

/// Collab Sync - Create GitHub repositories and keep their collaborators in sync
#[derive(Parser, Debug)]
#[command(name = "collab-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "info",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,

    /// GitHub API token
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub API base URL (for GitHub Enterprise Server)
    #[arg(long, global = true, value_name = "URL", env = "GITHUB_API_URL")]
    api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or update a team repository from a manifest file
    Sync(commands::sync::SyncArgs),

    /// Create or edit a repository through interactive prompts
    Interactive(commands::interactive::InteractiveArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

/// Settings shared by every command.
pub struct Context {
    pub output: OutputConfig,
    token: Option<String>,
    api_url: Option<String>,
}

impl Context {
    /// Resolves the host settings, failing if no token was supplied.
    pub fn host_config(&self) -> collab_sync::error::Result<HostConfig> {
        HostConfig::resolve(self.token.clone(), self.api_url.clone())
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let Cli {
            command,
            color,
            log_level,
            token,
            api_url,
        } = self;

        init_logging(&log_level);

        let context = Context {
            output: OutputConfig::from_env_and_flag(&color),
            token,
            api_url,
        };

        match command {
            Commands::Sync(args) => commands::sync::execute(args, &context),
            Commands::Interactive(args) => commands::interactive::execute(args, &context),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Sends `log` records to stderr at the requested level.
fn init_logging(level: &str) {
    let _ = env_logger::Builder::new()
        .parse_filters(level)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
