//! # Manifest Sync Driver
//!
//! Brings one team repository in line with a [`Manifest`]:
//!
//! 1. Look up the authenticated owner.
//! 2. Check whether `owner/teamName` exists. A "not found" answer is normal;
//!    any other failure aborts the run.
//! 3. If the repository is missing, create it and add every desired
//!    collaborator.
//! 4. Otherwise list the current collaborators, [`reconcile`] them against the
//!    manifest and apply the additions, then the removals.
//!
//! Every mutation is an independent, best-effort call. A failure is logged and
//! recorded in the [`SyncReport`], and the run moves on to the next call.
//! Nothing is retried or rolled back.

use std::fmt;

use log::{debug, warn};

use crate::error::Result;
use crate::host::{RepoLookup, RepositoryHost};
use crate::identity::Identity;
use crate::manifest::Manifest;
use crate::reconcile::{reconcile, Reconciliation};

/// Knobs for a sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Compute and report the plan without issuing any mutation.
    pub dry_run: bool,
}

/// One host call a sync run issues (or would issue).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateRepository { name: String, private: bool },
    ListCollaborators,
    AddCollaborator(Identity),
    RemoveCollaborator(Identity),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CreateRepository { name, private } => write!(
                f,
                "create {} repository {}",
                if *private { "private" } else { "public" },
                name
            ),
            Action::ListCollaborators => f.write_str("list collaborators"),
            Action::AddCollaborator(user) => write!(f, "add collaborator {}", user),
            Action::RemoveCollaborator(user) => write!(f, "remove collaborator {}", user),
        }
    }
}

/// What happened to one [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Applied,
    /// Skipped because the run was a dry run.
    Planned,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub action: Action,
    pub status: Status,
}

/// Record of a sync run, in the order the calls were made.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub owner: Identity,
    pub repository: String,
    /// The repository did not exist and creation was attempted (or planned).
    pub created: bool,
    pub dry_run: bool,
    pub outcomes: Vec<Outcome>,
}

impl SyncReport {
    fn new(owner: Identity, repository: &str, dry_run: bool) -> Self {
        Self {
            owner,
            repository: repository.to_string(),
            created: false,
            dry_run,
            outcomes: Vec::new(),
        }
    }

    /// `owner/repository`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repository)
    }

    pub fn failures(&self) -> usize {
        self.count(|s| matches!(s, Status::Failed(_)))
    }

    pub fn applied(&self) -> usize {
        self.count(|s| *s == Status::Applied)
    }

    pub fn planned(&self) -> usize {
        self.count(|s| *s == Status::Planned)
    }

    fn count(&self, pred: impl Fn(&Status) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }

    /// Runs `call` unless this is a dry run, recording the outcome.
    ///
    /// Returns `true` when the call succeeded or was only planned.
    fn attempt(&mut self, action: Action, call: impl FnOnce() -> Result<()>) -> bool {
        let status = if self.dry_run {
            Status::Planned
        } else {
            debug!("{}: {}", self.full_name(), action);
            match call() {
                Ok(()) => Status::Applied,
                Err(e) => {
                    warn!("{}: {} failed: {}", self.full_name(), action, e);
                    Status::Failed(e.to_string())
                }
            }
        };
        let ok = !matches!(status, Status::Failed(_));
        self.outcomes.push(Outcome { action, status });
        ok
    }
}

/// Synchronizes the repository and collaborators declared by `manifest`.
///
/// Returns an error only for failures that make the run meaningless: the
/// owner lookup and the existence check. Everything after that is recorded
/// per call in the report.
pub fn sync_team(
    host: &dyn RepositoryHost,
    manifest: &Manifest,
    options: &SyncOptions,
) -> Result<SyncReport> {
    let owner = host.authenticated_identity()?;
    let name = manifest.team_name.as_str();
    let mut report = SyncReport::new(owner.clone(), name, options.dry_run);

    match host.repository_exists(&owner, name)? {
        RepoLookup::NotFound => {
            report.created = true;
            let repo = manifest.new_repository();
            let action = Action::CreateRepository {
                name: repo.name.clone(),
                private: repo.private,
            };
            let created = report.attempt(action, || host.create_repository(&repo).map(|_| ()));
            if created {
                let plan = reconcile(&manifest.collaborators, &[], &owner);
                apply(host, manifest, &mut report, plan);
            }
        }
        RepoLookup::Found => {
            let current = match host.list_collaborators(&owner, name) {
                Ok(current) => current,
                Err(e) => {
                    warn!("{}: list collaborators failed: {}", report.full_name(), e);
                    report.outcomes.push(Outcome {
                        action: Action::ListCollaborators,
                        status: Status::Failed(e.to_string()),
                    });
                    return Ok(report);
                }
            };
            let plan = reconcile(&manifest.collaborators, &current, &owner);
            apply(host, manifest, &mut report, plan);
        }
    }

    Ok(report)
}

/// Issues additions first, then removals.
fn apply(
    host: &dyn RepositoryHost,
    manifest: &Manifest,
    report: &mut SyncReport,
    plan: Reconciliation,
) {
    let owner = report.owner.clone();
    let name = manifest.team_name.as_str();
    debug!("{}: {} collaborator change(s)", report.full_name(), plan.len());

    for user in plan.to_add {
        let call = || host.add_collaborator(&owner, name, &user, manifest.permission);
        report.attempt(Action::AddCollaborator(user.clone()), call);
    }
    for user in plan.to_remove {
        let call = || host.remove_collaborator(&owner, name, &user);
        report.attempt(Action::RemoveCollaborator(user.clone()), call);
    }
}
