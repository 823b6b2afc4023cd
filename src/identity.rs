//! Case-insensitive account identities.
//!
//! GitHub treats usernames case-insensitively, so `Octocat` and `octocat` name
//! the same account. [`Identity`] keeps the spelling it was created with for
//! display, but equality, ordering and hashing all use the lowercase form.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A host account username, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct Identity {
    name: String,
    key: String,
}

impl Identity {
    /// Creates an identity, returning `None` if the value is empty or blank.
    ///
    /// Surrounding whitespace is trimmed.
    pub fn new(value: impl AsRef<str>) -> Option<Self> {
        let name = value.as_ref().trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            key: name.to_lowercase(),
        })
    }

    /// The name as originally spelled.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The lowercase form used for comparisons.
    pub fn normalized(&self) -> &str {
        &self.key
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Identity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
