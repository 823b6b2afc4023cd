//! # Collab Sync Library
//!
//! This library creates GitHub repositories and keeps their collaborator lists
//! in sync. It is used by the `collab-sync` command-line tool but the drivers
//! only depend on the [`host::RepositoryHost`] trait, so they can run against
//! any implementation of it.
//!
//! ## Quick Example
//!
//! ```
//! use collab_sync::identity::Identity;
//! use collab_sync::reconcile::reconcile;
//!
//! let ids = |names: &[&str]| -> Vec<Identity> {
//!     names.iter().filter_map(Identity::new).collect()
//! };
//!
//! let owner = Identity::new("owner1").unwrap();
//! let plan = reconcile(&ids(&["alice", "BOB"]), &ids(&["bob", "carol", "owner1"]), &owner);
//!
//! assert_eq!(plan.to_add.iter().map(|id| id.as_str()).collect::<Vec<_>>(), ["alice"]);
//! assert_eq!(plan.to_remove.iter().map(|id| id.as_str()).collect::<Vec<_>>(), ["carol"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Identities (`identity`)**: usernames compared case-insensitively.
//! - **Reconciliation (`reconcile`)**: the add/remove sets that turn the
//!   current collaborator list into the desired one, never removing the owner.
//! - **Manifests (`manifest`)**: JSON or YAML files declaring a team
//!   repository and its collaborators.
//! - **Host access (`host`, `github`, `config`)**: the repository host trait,
//!   its GitHub REST implementation and the token/base-URL settings.
//! - **Drivers (`sync`, `session`)**: the manifest flow and the interactive
//!   prompt flow.
//!
//! ## Execution Flow
//!
//! The manifest flow (`sync::sync_team`) runs these steps, strictly one host
//! call at a time:
//!
//! 1.  **Identify**: look up the authenticated owner.
//! 2.  **Lookup**: check whether the team repository exists.
//! 3.  **Create or list**: create a missing repository, or list the current
//!     collaborators of an existing one.
//! 4.  **Reconcile**: compute additions and removals.
//! 5.  **Apply**: add, then remove, each call independent and best-effort.

pub mod config;
pub mod error;
pub mod github;
pub mod host;
pub mod identity;
pub mod manifest;
pub mod output;
pub mod reconcile;
pub mod session;
pub mod sync;

#[cfg(test)]
mod reconcile_proptest;
