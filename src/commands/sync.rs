//! # Sync Command Implementation
//!
//! This module implements the `sync` subcommand, which brings one team
//! repository in line with a manifest file.
//!
//! ## Functionality
//!
//! - **Create**: a repository missing from the account is created and every
//!   listed collaborator is invited
//! - **Reconcile**: an existing repository gets the missing collaborators
//!   added and the unlisted ones removed (never the owner)
//! - **Dry Run**: shows the planned changes without making them
//!
//! Individual API failures are reported and skipped; the command still exits
//! successfully and finishes with a summary line.

use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;

use collab_sync::github::GitHubClient;
use collab_sync::manifest;
use collab_sync::output::{completion_line, outcome_line};
use collab_sync::sync::{sync_team, SyncOptions};

use crate::cli::Context;

/// Create or update a team repository from a manifest file
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the team manifest (JSON, or YAML for .yaml/.yml files)
    #[arg(short, long, value_name = "PATH", env = "COLLAB_SYNC_MANIFEST")]
    pub manifest: PathBuf,

    /// Show what would be done without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Execute the `sync` command.
///
/// The token is checked first and the manifest second, so both fatal
/// conditions are reported before any request reaches the host.
pub fn execute(args: SyncArgs, context: &Context) -> Result<()> {
    let config = context.host_config()?;
    let manifest = manifest::from_file(&args.manifest)
        .with_context(|| format!("Failed to load manifest {}", args.manifest.display()))?;

    let out = &context.output;
    println!("{} Syncing team repository {}", out.marker("🔄", "[SYNC]"), manifest.team_name);
    if args.dry_run {
        println!("{} DRY RUN MODE - No changes will be made", out.marker("🔎", "[DRY RUN]"));
    }
    println!();

    let client = GitHubClient::new(&config)?;
    let options = SyncOptions {
        dry_run: args.dry_run,
    };
    let report = sync_team(&client, &manifest, &options)?;

    if report.created && !report.dry_run {
        println!("{} {} did not exist", out.marker("🆕", "[NEW]"), report.full_name());
    }
    for outcome in &report.outcomes {
        println!("{}", outcome_line(out, outcome));
    }
    println!();
    println!("{}", completion_line(out, &report));

    Ok(())
}
