//! # Interactive Session Driver
//!
//! Walks the user through creating a repository or editing an existing one,
//! one prompt at a time. Unlike the manifest flow there is no reconciliation:
//! every username entered is applied immediately, before the next prompt.
//!
//! The terminal is reached through the [`Prompter`] trait. The binary backs it
//! with `dialoguer`; tests back it with a scripted list of answers.
//!
//! ## Prompt sequence
//!
//! 1. `create` or `edit`
//! 2. repository name
//! 3. create: description, visibility, then usernames to invite
//! 4. edit: `add`, `remove` or `delete`, then usernames (add/remove) or a
//!    `yes` confirmation (delete)
//!
//! Username entry ends at the first empty line.

use log::warn;

use crate::error::{Error, Result};
use crate::host::{NewRepository, Permission, RepoLookup, RepositoryHost};
use crate::identity::Identity;

/// Line-based terminal access.
pub trait Prompter {
    /// Shows `prompt` and returns the line the user entered, which may be empty.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Shows an informational line.
    fn tell(&mut self, message: &str);
}

/// Top-level choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit,
}

/// What to do to an existing repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Add,
    Remove,
    Delete,
}

/// Tally of host calls made during a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub repository: Option<String>,
    pub applied: usize,
    pub failed: usize,
}

/// Usernames read one per line until an empty line.
///
/// Reading is lazy: the next prompt is only shown when the previous username
/// has been handled by the caller.
pub struct Usernames<'a> {
    prompter: &'a mut dyn Prompter,
    prompt: &'a str,
    done: bool,
}

impl<'a> Usernames<'a> {
    pub fn new(prompter: &'a mut dyn Prompter, prompt: &'a str) -> Self {
        Self {
            prompter,
            prompt,
            done: false,
        }
    }

    /// Shows a message between entries.
    pub fn tell(&mut self, message: &str) {
        self.prompter.tell(message);
    }
}

impl Iterator for Usernames<'_> {
    type Item = Result<Identity>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.prompter.ask(self.prompt) {
            Ok(line) => match Identity::new(&line) {
                Some(id) => Some(Ok(id)),
                None => {
                    self.done = true;
                    None
                }
            },
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// A session that stopped on an error, with the tally of calls made before it.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct Interrupted {
    pub summary: SessionSummary,
    #[source]
    pub error: Error,
}

/// Runs one interactive session against `host`.
///
/// Invited collaborators are granted `permission`. When a prompt or a fatal
/// host call fails part-way, the calls already applied are still reported
/// through [`Interrupted::summary`].
pub fn run(
    host: &dyn RepositoryHost,
    prompter: &mut dyn Prompter,
    permission: Permission,
) -> std::result::Result<SessionSummary, Interrupted> {
    let mut summary = SessionSummary::default();
    match drive(host, prompter, permission, &mut summary) {
        Ok(()) => Ok(summary),
        Err(error) => Err(Interrupted { summary, error }),
    }
}

fn drive(
    host: &dyn RepositoryHost,
    prompter: &mut dyn Prompter,
    permission: Permission,
    summary: &mut SessionSummary,
) -> Result<()> {
    let mode = choose(
        prompter,
        "Create a new repository or edit an existing one? (create/edit)",
        &[("create", Mode::Create), ("edit", Mode::Edit)],
    )?;
    let name = ask_non_empty(prompter, "Repository name")?;
    let owner = host.authenticated_identity()?;
    summary.repository = Some(format!("{}/{}", owner, name));

    match mode {
        Mode::Create => create(host, prompter, &owner, &name, permission, summary),
        Mode::Edit => edit(host, prompter, &owner, &name, permission, summary),
    }
}

fn create(
    host: &dyn RepositoryHost,
    prompter: &mut dyn Prompter,
    owner: &Identity,
    name: &str,
    permission: Permission,
    summary: &mut SessionSummary,
) -> Result<()> {
    let description = prompter.ask("Description (optional)")?;
    let private = ask_yes_no(prompter, "Make the repository private? (yes/no)", true)?;

    let repo = NewRepository {
        name: name.to_string(),
        description: Some(description.trim().to_string()).filter(|d| !d.is_empty()),
        private,
    };
    match host.create_repository(&repo) {
        Ok(location) => {
            summary.applied += 1;
            prompter.tell(&format!(
                "Repository {} created: {}",
                location.full_name, location.html_url
            ));
        }
        Err(e) => {
            summary.failed += 1;
            warn!("create repository {} failed: {}", name, e);
            prompter.tell(&format!("Could not create {}: {}", name, e));
            return Ok(());
        }
    }

    add_each(
        host,
        prompter,
        owner,
        name,
        "Username to invite (empty line to finish)",
        permission,
        summary,
    )
}

fn edit(
    host: &dyn RepositoryHost,
    prompter: &mut dyn Prompter,
    owner: &Identity,
    name: &str,
    permission: Permission,
    summary: &mut SessionSummary,
) -> Result<()> {
    if host.repository_exists(owner, name)? == RepoLookup::NotFound {
        let err = Error::RepositoryNotFound {
            owner: owner.to_string(),
            name: name.to_string(),
        };
        prompter.tell(&err.to_string());
        return Ok(());
    }

    let action = choose(
        prompter,
        "What do you want to do? (add/remove/delete)",
        &[
            ("add", EditAction::Add),
            ("remove", EditAction::Remove),
            ("delete", EditAction::Delete),
        ],
    )?;

    match action {
        EditAction::Add => add_each(
            host,
            prompter,
            owner,
            name,
            "Username to add (empty line to finish)",
            permission,
            summary,
        ),
        EditAction::Remove => remove_each(host, prompter, owner, name, summary),
        EditAction::Delete => {
            let answer = prompter.ask(&format!(
                "Type 'yes' to permanently delete {}/{}",
                owner, name
            ))?;
            if !answer.trim().eq_ignore_ascii_case("yes") {
                prompter.tell("Deletion cancelled.");
                return Ok(());
            }
            match host.delete_repository(owner, name) {
                Ok(()) => {
                    summary.applied += 1;
                    prompter.tell(&format!("Deleted {}/{}.", owner, name));
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!("delete repository {}/{} failed: {}", owner, name, e);
                    prompter.tell(&format!("Could not delete {}/{}: {}", owner, name, e));
                }
            }
            Ok(())
        }
    }
}

fn add_each(
    host: &dyn RepositoryHost,
    prompter: &mut dyn Prompter,
    owner: &Identity,
    name: &str,
    prompt: &str,
    permission: Permission,
    summary: &mut SessionSummary,
) -> Result<()> {
    let mut users = Usernames::new(prompter, prompt);
    while let Some(user) = users.next() {
        let user = user?;
        match host.add_collaborator(owner, name, &user, permission) {
            Ok(()) => {
                summary.applied += 1;
                users.tell(&format!("Invitation sent to {}.", user));
            }
            Err(e) => {
                summary.failed += 1;
                warn!("add collaborator {} to {} failed: {}", user, name, e);
                users.tell(&format!("Could not add {}: {}", user, e));
            }
        }
    }
    Ok(())
}

fn remove_each(
    host: &dyn RepositoryHost,
    prompter: &mut dyn Prompter,
    owner: &Identity,
    name: &str,
    summary: &mut SessionSummary,
) -> Result<()> {
    let mut users = Usernames::new(prompter, "Username to remove (empty line to finish)");
    while let Some(user) = users.next() {
        let user = user?;
        if user == *owner {
            users.tell(&format!("{} owns the repository and cannot be removed.", user));
            continue;
        }
        match host.remove_collaborator(owner, name, &user) {
            Ok(()) => {
                summary.applied += 1;
                users.tell(&format!("Removed {}.", user));
            }
            Err(e) => {
                summary.failed += 1;
                warn!("remove collaborator {} from {} failed: {}", user, name, e);
                users.tell(&format!("Could not remove {}: {}", user, e));
            }
        }
    }
    Ok(())
}

/// Asks until the answer matches one of `options` (case-insensitive).
fn choose<T: Copy>(prompter: &mut dyn Prompter, prompt: &str, options: &[(&str, T)]) -> Result<T> {
    loop {
        let answer = prompter.ask(prompt)?;
        let answer = answer.trim();
        if let Some((_, value)) = options
            .iter()
            .find(|(word, _)| word.eq_ignore_ascii_case(answer))
        {
            return Ok(*value);
        }
        let words: Vec<&str> = options.iter().map(|(word, _)| *word).collect();
        prompter.tell(&format!("Please answer one of: {}", words.join(", ")));
    }
}

fn ask_non_empty(prompter: &mut dyn Prompter, prompt: &str) -> Result<String> {
    loop {
        let answer = prompter.ask(prompt)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
        prompter.tell("A value is required.");
    }
}

/// `yes`/`no`, with `default` for an empty answer.
fn ask_yes_no(prompter: &mut dyn Prompter, prompt: &str, default: bool) -> Result<bool> {
    loop {
        let answer = prompter.ask(prompt)?;
        match answer.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "yes" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => prompter.tell("Please answer yes or no."),
        }
    }
}
