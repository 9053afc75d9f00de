//! Property-based tests for the layout classifier.
//!
//! These tests use proptest to generate random listings and verify that the
//! boundary rules hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::classify::{has_trunk_folder, is_excluded_name, is_project_boundary};
    use crate::repository::{EntryKind, RepositoryEntry};
    use proptest::prelude::*;

    /// Flip the case of each ASCII letter according to a bit mask.
    fn recase(name: &str, mask: u64) -> String {
        name.chars()
            .enumerate()
            .map(|(i, c)| {
                if mask & (1 << i) != 0 {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    }

    fn kind() -> impl Strategy<Value = EntryKind> {
        prop_oneof![Just(EntryKind::File), Just(EntryKind::Directory)]
    }

    /// Names that can never collide with trunk, branches or tags.
    fn plain_name() -> impl Strategy<Value = String> {
        "[a-z0-9_-]{1,12}".prop_filter("reserved name", |n| {
            !["trunk", "branches", "tags"].contains(&n.as_str())
        })
    }

    fn plain_entries() -> impl Strategy<Value = Vec<RepositoryEntry>> {
        prop::collection::vec(
            (plain_name(), kind()).prop_map(|(name, kind)| RepositoryEntry::new(name, kind)),
            0..8,
        )
    }

    proptest! {
        /// Property: a branches/tags entry in any case is excluded and makes a boundary
        #[test]
        fn excluded_name_any_case_makes_boundary(
            mut entries in plain_entries(),
            reserved in prop_oneof![Just("branches"), Just("tags")],
            mask in any::<u64>(),
            position in any::<prop::sample::Index>(),
        ) {
            let entry = RepositoryEntry::directory(recase(reserved, mask));
            prop_assert!(is_excluded_name(&entry));

            let at = position.index(entries.len() + 1);
            entries.insert(at, entry);
            prop_assert!(is_project_boundary(&entries));
        }

        /// Property: trunk in any case makes a boundary
        #[test]
        fn trunk_any_case_makes_boundary(
            mut entries in plain_entries(),
            mask in any::<u64>(),
        ) {
            entries.push(RepositoryEntry::directory(recase("trunk", mask)));
            prop_assert!(has_trunk_folder(&entries));
            prop_assert!(is_project_boundary(&entries));
        }

        /// Property: listings without reserved names are never boundaries
        #[test]
        fn plain_listing_is_not_boundary(entries in plain_entries()) {
            prop_assert!(!has_trunk_folder(&entries));
            prop_assert!(!is_project_boundary(&entries));
            prop_assert!(entries.iter().all(|e| !is_excluded_name(e)));
        }

        /// Property: the classification does not depend on entry order
        #[test]
        fn boundary_is_order_independent(mut entries in plain_entries(), with_trunk in any::<bool>()) {
            if with_trunk {
                entries.push(RepositoryEntry::directory("trunk"));
            }
            let before = is_project_boundary(&entries);
            entries.reverse();
            prop_assert_eq!(before, is_project_boundary(&entries));
        }
    }
}
