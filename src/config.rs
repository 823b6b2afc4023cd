//! # Host Configuration
//!
//! Resolves the settings needed to talk to the repository host: the API token
//! and the API base URL.
//!
//! The token comes from `--token` or the `GITHUB_TOKEN` environment variable
//! (clap fills the former from the latter in the binary). A missing or blank
//! token is a fatal startup error, raised before anything else happens.
//!
//! The base URL defaults to the public GitHub API and can be pointed at a
//! GitHub Enterprise Server instance (`https://ghe.example.com/api/v3`).

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// An API token. Never printed.
#[derive(Clone)]
pub struct Token(String);

impl Token {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Everything needed to construct a host client.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub api_url: Url,
    pub token: Token,
}

impl HostConfig {
    /// Builds a configuration from explicitly supplied values.
    ///
    /// `api_url` falls back to [`DEFAULT_API_URL`] when `None`.
    pub fn resolve(token: Option<String>, api_url: Option<String>) -> Result<Self> {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::MissingToken {
                variable: TOKEN_ENV.to_string(),
            })?;

        let api_url = api_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_url: Url::parse(&api_url)?,
            token: Token(token),
        })
    }
}
