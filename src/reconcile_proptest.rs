//! Property-based tests for collaborator reconciliation.
//!
//! These tests use proptest to generate random collaborator lists and verify
//! that the reconciliation invariants hold for all of them. Names are drawn
//! from a tiny alphabet in mixed case so that case-only collisions between the
//! desired, current and owner inputs are common.

#[cfg(test)]
mod proptest_tests {
    use crate::identity::Identity;
    use crate::reconcile::reconcile;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn identity() -> impl Strategy<Value = Identity> {
        "[a-cA-C]{1,2}".prop_map(|s| Identity::new(s).expect("non-empty by construction"))
    }

    fn identities() -> impl Strategy<Value = Vec<Identity>> {
        prop::collection::vec(identity(), 0..8)
    }

    fn set(ids: &[Identity]) -> BTreeSet<Identity> {
        ids.iter().cloned().collect()
    }

    /// Flips the case of every character.
    fn swap_case(id: &Identity) -> Identity {
        let swapped: String = id
            .as_str()
            .chars()
            .map(|c| {
                if c.is_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect();
        Identity::new(swapped).expect("non-empty by construction")
    }

    proptest! {
        /// Property: nothing is both added and removed
        #[test]
        fn add_and_remove_are_disjoint(d in identities(), c in identities(), o in identity()) {
            let result = reconcile(&d, &c, &o);
            prop_assert!(result.to_add.is_disjoint(&result.to_remove));
        }

        /// Property: nobody already collaborating is added
        #[test]
        fn to_add_excludes_current(d in identities(), c in identities(), o in identity()) {
            let result = reconcile(&d, &c, &o);
            prop_assert!(result.to_add.is_disjoint(&set(&c)));
        }

        /// Property: nobody desired is removed
        #[test]
        fn to_remove_excludes_desired(d in identities(), c in identities(), o in identity()) {
            let result = reconcile(&d, &c, &o);
            prop_assert!(result.to_remove.is_disjoint(&set(&d)));
        }

        /// Property: the owner is never removed, whatever the desired set says
        #[test]
        fn owner_never_removed(d in identities(), c in identities(), o in identity()) {
            let mut current = c.clone();
            current.push(o.clone());
            let result = reconcile(&d, &current, &o);
            prop_assert!(!result.to_remove.contains(&o));
        }

        /// Property: reconciling a set against itself is a no-op, even when the
        /// two copies disagree on casing
        #[test]
        fn reconcile_with_self_is_empty(d in identities(), o in identity()) {
            let recased: Vec<Identity> = d.iter().map(swap_case).collect();
            let result = reconcile(&d, &recased, &o);
            prop_assert!(result.is_empty());
        }

        /// Property: an empty desired set removes every current collaborator
        /// except the owner
        #[test]
        fn empty_desired_removes_all_but_owner(c in identities(), o in identity()) {
            let result = reconcile(&[], &c, &o);
            let mut expected = set(&c);
            expected.remove(&o);
            prop_assert!(result.to_add.is_empty());
            prop_assert_eq!(result.to_remove, expected);
        }

        /// Property: an empty current set adds every desired identity
        #[test]
        fn empty_current_adds_all_desired(d in identities(), o in identity()) {
            let result = reconcile(&d, &[], &o);
            prop_assert_eq!(result.to_add, set(&d));
            prop_assert!(result.to_remove.is_empty());
        }
    }
}
