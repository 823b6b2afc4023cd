//! # Error Handling
//!
//! This module defines the centralized error type for the `collab-sync`
//! library. It uses `thiserror` to build a single `Error` enum covering every
//! failure the drivers can meet, with a `Result<T>` alias used throughout.
//!
//! The variants fall into the four classes the tool distinguishes at runtime:
//!
//! - **Startup errors** (`MissingToken`, `UrlParse`): abort before any host call.
//! - **Input errors** (`Manifest`, `Io`, `Json`, `Yaml`, `Prompt`): abort
//!   before any mutation.
//! - **Host errors** (`Host`, `Http`): a single API call failed. The drivers
//!   catch these per call, log them and carry on with the next call.
//! - **Lookup errors** (`RepositoryNotFound`): the interactive edit flow was
//!   pointed at a repository that does not exist.

use thiserror::Error;

/// Main error type for collab-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// No API token was supplied on the command line or in the environment.
    #[error("No GitHub token found: set {variable} or pass --token")]
    MissingToken {
        /// Name of the environment variable that was consulted.
        variable: String,
    },

    /// The team manifest has the wrong shape.
    ///
    /// Includes an optional hint describing the expected layout.
    #[error("Manifest error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Manifest {
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// The host answered an API call with a non-success status.
    #[error("{operation} failed{}: {message}", status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Host {
        operation: String,
        status: Option<u16>,
        message: String,
    },

    /// The repository targeted by an edit does not exist under the owner.
    #[error("Repository {owner}/{name} not found")]
    RepositoryNotFound { owner: String, name: String },

    /// Reading an answer from the terminal failed.
    #[error("Prompt error: {message}")]
    Prompt { message: String },

    /// A transport-level HTTP failure, wrapped from `reqwest::Error`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Builds a manifest error without a hint.
    pub fn manifest(message: impl Into<String>) -> Self {
        Error::Manifest {
            message: message.into(),
            hint: None,
        }
    }

    /// Builds a manifest error carrying a hint.
    pub fn manifest_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Error::Manifest {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
