//! # Team Manifest
//!
//! A manifest declares one team repository and who should have access to it:
//!
//! ```json
//! {
//!   "teamName": "platform-team",
//!   "collaborators": ["alice", "bob"],
//!   "description": "Platform team workspace",
//!   "private": true,
//!   "permission": "push"
//! }
//! ```
//!
//! `teamName` and `collaborators` are required. `description` is optional,
//! `private` defaults to `true` and `permission` defaults to `push`.
//!
//! Files ending in `.yaml` or `.yml` are read as YAML with the same layout.
//! Both formats are first parsed into a raw `serde_json::Value` and then
//! validated field by field, so every shape problem produces a precise
//! [`Error::Manifest`] with a hint instead of a generic deserializer message.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::host::{NewRepository, Permission};
use crate::identity::Identity;

const LAYOUT_HINT: &str =
    r#"Expected {"teamName": "<repository>", "collaborators": ["<username>", ...]}"#;

/// Desired state of one team repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Repository name, created under the authenticated account.
    pub team_name: String,
    /// Everyone who should have access, besides the owner.
    pub collaborators: Vec<Identity>,
    pub description: Option<String>,
    pub private: bool,
    pub permission: Permission,
}

impl Manifest {
    /// The repository to create when it does not exist yet.
    pub fn new_repository(&self) -> NewRepository {
        NewRepository {
            name: self.team_name.clone(),
            description: self.description.clone(),
            private: self.private,
        }
    }
}

/// Parses a JSON manifest.
pub fn parse_json(content: &str) -> Result<Manifest> {
    let value: Value = serde_json::from_str(content)?;
    from_value(value)
}

/// Parses a YAML manifest.
pub fn parse_yaml(content: &str) -> Result<Manifest> {
    let value: Value = serde_yaml::from_str(content)?;
    from_value(value)
}

/// Reads and parses a manifest file, choosing the format by extension.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        parse_yaml(&content)
    } else {
        parse_json(&content)
    }
}

/// Validates a raw manifest value.
pub fn from_value(value: Value) -> Result<Manifest> {
    let Value::Object(map) = value else {
        return Err(Error::manifest_with_hint(
            "manifest must be an object",
            LAYOUT_HINT,
        ));
    };

    Ok(Manifest {
        team_name: team_name(&map)?,
        collaborators: collaborators(&map)?,
        description: description(&map)?,
        private: private(&map)?,
        permission: permission(&map)?,
    })
}

fn team_name(map: &Map<String, Value>) -> Result<String> {
    match map.get("teamName") {
        None | Some(Value::Null) => Err(Error::manifest_with_hint(
            "missing 'teamName'",
            LAYOUT_HINT,
        )),
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        Some(Value::String(_)) => Err(Error::manifest("'teamName' must not be empty")),
        Some(_) => Err(Error::manifest("'teamName' must be a string")),
    }
}

fn collaborators(map: &Map<String, Value>) -> Result<Vec<Identity>> {
    let entries = match map.get("collaborators") {
        None | Some(Value::Null) => {
            return Err(Error::manifest_with_hint(
                "missing 'collaborators'",
                LAYOUT_HINT,
            ))
        }
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(Error::manifest_with_hint(
                "'collaborators' must be a list",
                r#"Use "collaborators": ["alice", "bob"]"#,
            ))
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .as_str()
                .and_then(Identity::new)
                .ok_or_else(|| {
                    Error::manifest(format!(
                        "collaborators[{}] must be a non-empty username string",
                        index
                    ))
                })
        })
        .collect()
}

fn description(map: &Map<String, Value>) -> Result<Option<String>> {
    match map.get("description") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(Error::manifest("'description' must be a string")),
    }
}

fn private(map: &Map<String, Value>) -> Result<bool> {
    match map.get("private") {
        None | Some(Value::Null) => Ok(true),
        Some(Value::Bool(private)) => Ok(*private),
        Some(_) => Err(Error::manifest("'private' must be true or false")),
    }
}

fn permission(map: &Map<String, Value>) -> Result<Permission> {
    match map.get("permission") {
        None | Some(Value::Null) => Ok(Permission::default()),
        Some(Value::String(level)) => level.parse(),
        Some(_) => Err(Error::manifest("'permission' must be a string")),
    }
}
