//! Layout classification of remote directory listings.
//!
//! A directory holding `trunk`, `branches` or `tags` is taken to be the root of
//! a single project. Either signal on its own is enough: some projects have a
//! `trunk` with no siblings yet, others have `branches`/`tags` around an empty
//! or missing `trunk`. Names are compared case-insensitively.

use crate::repository::RepositoryEntry;

const TRUNK: &str = "trunk";
const EXCLUDED: [&str; 2] = ["branches", "tags"];

/// Returns true if the entry is a `branches` or `tags` folder.
pub fn is_excluded_name(entry: &RepositoryEntry) -> bool {
    EXCLUDED
        .iter()
        .any(|name| entry.name.eq_ignore_ascii_case(name))
}

/// Returns true if any entry is named `trunk`.
pub fn has_trunk_folder(entries: &[RepositoryEntry]) -> bool {
    entries
        .iter()
        .any(|entry| entry.name.eq_ignore_ascii_case(TRUNK))
}

/// Returns true if the listing is a project root, i.e. the walk should act on
/// its children instead of descending further.
pub fn is_project_boundary(entries: &[RepositoryEntry]) -> bool {
    has_trunk_folder(entries) || entries.iter().any(is_excluded_name)
}
