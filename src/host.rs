//! # Repository Host Abstraction
//!
//! This module defines [`RepositoryHost`], the interface the drivers use to
//! talk to the service that stores repositories and their collaborator lists.
//!
//! ## Design
//!
//! The drivers never construct a client themselves. The CLI builds one
//! [`crate::github::GitHubClient`] at startup and passes it down as
//! `&dyn RepositoryHost`, so tests can substitute a recording mock and check
//! exactly which calls were issued and in what order.
//!
//! Existence checks return a [`RepoLookup`] inside a `Result`: only a genuine
//! "not found" answer becomes [`RepoLookup::NotFound`], every other failure
//! stays an error and cannot be mistaken for absence.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::identity::Identity;

/// Answer to a repository existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoLookup {
    Found,
    NotFound,
}

/// Access level granted to a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Pull,
    Triage,
    #[default]
    Push,
    Maintain,
    Admin,
}

impl Permission {
    /// All accepted values, in increasing order of privilege.
    pub const ALL: [Permission; 5] = [
        Permission::Pull,
        Permission::Triage,
        Permission::Push,
        Permission::Maintain,
        Permission::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Pull => "pull",
            Permission::Triage => "triage",
            Permission::Push => "push",
            Permission::Maintain => "maintain",
            Permission::Admin => "admin",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                Error::manifest_with_hint(
                    format!("unknown permission '{}'", s),
                    "Use one of: pull, triage, push, maintain, admin",
                )
            })
    }
}

/// Parameters for creating a repository under the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRepository {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub private: bool,
}

impl NewRepository {
    /// A private repository with no description.
    pub fn private(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            private: true,
        }
    }
}

/// Where a newly created repository lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    /// `owner/name`
    pub full_name: String,
    /// Browser URL of the repository.
    pub html_url: String,
}

/// Repository and collaborator management operations.
///
/// Every method issues at most one logical request and blocks until it
/// completes. Implementations must not retry.
pub trait RepositoryHost: Send + Sync {
    /// Returns the account the credentials belong to.
    fn authenticated_identity(&self) -> Result<Identity>;

    /// Checks whether `owner/name` exists.
    fn repository_exists(&self, owner: &Identity, name: &str) -> Result<RepoLookup>;

    /// Creates a repository under the authenticated account.
    fn create_repository(&self, repo: &NewRepository) -> Result<RepoLocation>;

    /// Permanently deletes `owner/name`.
    fn delete_repository(&self, owner: &Identity, name: &str) -> Result<()>;

    /// Grants `user` access to `owner/name`.
    ///
    /// Adding someone who is already a collaborator is not an error at this
    /// layer; the host's own semantics apply.
    fn add_collaborator(
        &self,
        owner: &Identity,
        name: &str,
        user: &Identity,
        permission: Permission,
    ) -> Result<()>;

    /// Revokes `user`'s access to `owner/name`.
    fn remove_collaborator(&self, owner: &Identity, name: &str, user: &Identity) -> Result<()>;

    /// Lists everyone with access to `owner/name`.
    fn list_collaborators(&self, owner: &Identity, name: &str) -> Result<Vec<Identity>>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_parse_is_case_insensitive() {
        assert_eq!("PUSH".parse::<Permission>().unwrap(), Permission::Push);
        assert_eq!(" admin ".parse::<Permission>().unwrap(), Permission::Admin);
    }

    #[test]
    fn test_permission_parse_rejects_unknown() {
        let err = "owner".parse::<Permission>().unwrap_err();
        let display = err.to_string();
        assert!(display.contains("unknown permission 'owner'"));
        assert!(display.contains("maintain"));
    }

    #[test]
    fn test_permission_default_is_push() {
        assert_eq!(Permission::default(), Permission::Push);
    }

    #[test]
    fn test_permission_serializes_lowercase() {
        let json = serde_json::to_string(&Permission::Maintain).unwrap();
        assert_eq!(json, "\"maintain\"");
    }

    #[test]
    fn test_new_repository_body_omits_missing_description() {
        let body = serde_json::to_value(NewRepository::private("team-a")).unwrap();
        assert_eq!(body, serde_json::json!({"name": "team-a", "private": true}));
    }
}
