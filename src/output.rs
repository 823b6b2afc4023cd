//! # Output Configuration
//!
//! Controls how the CLI renders results: whether to use color and emoji
//! markers, and how a [`SyncReport`] is turned into lines for the terminal.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::style;

use crate::sync::{Outcome, Status, SyncReport};

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `--color=always` forces colors on (overriding `NO_COLOR`),
    /// `--color=never` forces them off, anything else auto-detects.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    /// Picks the emoji when colors are enabled, the plain marker otherwise.
    pub fn marker<'a>(&self, emoji: &'a str, plain: &'a str) -> &'a str {
        if self.use_color {
            emoji
        } else {
            plain
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Renders one outcome as a single line.
pub fn outcome_line(config: &OutputConfig, outcome: &Outcome) -> String {
    match &outcome.status {
        Status::Applied => format!("{} {}", config.marker("✅", "[OK]"), outcome.action),
        Status::Planned => format!("{} would {}", config.marker("📝", "[PLAN]"), outcome.action),
        Status::Failed(message) => {
            let line = format!(
                "{} {}: {}",
                config.marker("❌", "[FAIL]"),
                outcome.action,
                message
            );
            if config.use_color {
                style(line).red().to_string()
            } else {
                line
            }
        }
    }
}

/// Renders the closing line of a sync run. Always produced, whatever failed.
pub fn completion_line(config: &OutputConfig, report: &SyncReport) -> String {
    if report.dry_run {
        return format!(
            "{} Dry run complete for {}: {} change(s) planned",
            config.marker("🔎", "[DONE]"),
            report.full_name(),
            report.planned()
        );
    }

    if report.outcomes.is_empty() {
        return format!(
            "{} {} is already up to date",
            config.marker("✨", "[DONE]"),
            report.full_name()
        );
    }

    format!(
        "{} Sync complete for {}: {} applied, {} failed",
        config.marker("🏁", "[DONE]"),
        report.full_name(),
        report.applied(),
        report.failures()
    )
}
