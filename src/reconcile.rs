//! # Collaborator Reconciliation
//!
//! Computes the add/remove operations that turn a repository's current
//! collaborator list into the desired one.
//!
//! The rules are:
//!
//! - Identities are compared by their lowercase form (see [`Identity`]).
//! - Everyone desired but not currently a collaborator is added.
//! - Everyone currently a collaborator but not desired is removed, except the
//!   repository owner, who is never removed.
//!
//! Both result sets are `BTreeSet`s, so callers iterating them issue host calls
//! in a stable, case-insensitive alphabetical order.

use std::collections::BTreeSet;

use crate::identity::Identity;

/// The operations needed to reach the desired collaborator set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Identities in the desired set that are not collaborators yet.
    pub to_add: BTreeSet<Identity>,
    /// Current collaborators that are not desired, never including the owner.
    pub to_remove: BTreeSet<Identity>,
}

impl Reconciliation {
    /// Returns `true` when the current state already matches the desired state.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Total number of host calls needed to apply this reconciliation.
    pub fn len(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }
}

/// Computes which identities to add and which to remove.
///
/// Duplicates that differ only by case collapse into one entry; the spelling
/// that appears first in the input is the one kept.
pub fn reconcile(desired: &[Identity], current: &[Identity], owner: &Identity) -> Reconciliation {
    let desired = first_spelling(desired);
    let current = first_spelling(current);

    let to_add = desired
        .difference(&current)
        .map(|id| (*id).clone())
        .collect();
    let to_remove = current
        .difference(&desired)
        .filter(|id| **id != owner)
        .map(|id| (*id).clone())
        .collect();

    Reconciliation { to_add, to_remove }
}

/// Collapses case-only duplicates, keeping the spelling seen first.
fn first_spelling(ids: &[Identity]) -> BTreeSet<&Identity> {
    let mut set = BTreeSet::new();
    for id in ids {
        set.insert(id);
    }
    set
}
