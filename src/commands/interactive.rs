//! # Interactive Command Implementation
//!
//! This module implements the `interactive` subcommand: a prompt-driven way to
//! create a repository and invite people, or to add, remove or delete on an
//! existing one. Prompts are rendered with `dialoguer`.

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

use collab_sync::error::Error;
use collab_sync::github::GitHubClient;
use collab_sync::host::Permission;
use collab_sync::output::OutputConfig;
use collab_sync::session::{self, Prompter, SessionSummary};

use crate::cli::Context;

/// Create or edit a repository through interactive prompts
#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Permission granted to invited collaborators
    #[arg(long, value_name = "LEVEL", default_value = "push")]
    pub permission: Permission,
}

/// `dialoguer`-backed terminal.
struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> collab_sync::error::Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::Prompt {
                message: e.to_string(),
            })
    }

    fn tell(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Execute the `interactive` command.
pub fn execute(args: InteractiveArgs, context: &Context) -> Result<()> {
    let config = context.host_config()?;
    let client = GitHubClient::new(&config)?;
    let out = &context.output;

    println!("{} collab-sync interactive mode", out.marker("🎯", "[START]"));
    println!();

    let mut prompter = TerminalPrompter {
        theme: ColorfulTheme::default(),
    };
    let (summary, failure) = match session::run(&client, &mut prompter, args.permission) {
        Ok(summary) => (summary, None),
        Err(interrupted) => (interrupted.summary, Some(interrupted.error)),
    };

    println!();
    println!("{}", finished_line(out, &summary, failure.is_some()));

    match failure {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

fn finished_line(out: &OutputConfig, summary: &SessionSummary, interrupted: bool) -> String {
    let (marker, verb) = if interrupted {
        (out.marker("⚠️", "[STOP]"), "interrupted")
    } else {
        (out.marker("🏁", "[DONE]"), "finished")
    };
    format!(
        "{} Session {} for {}: {} applied, {} failed",
        marker,
        verb,
        summary.repository.as_deref().unwrap_or("-"),
        summary.applied,
        summary.failed
    )
}
