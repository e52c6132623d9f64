// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Path normalization and key helpers.
//
// A flat key-value store has no directories, so paths become keys with a
// single canonical separator and directories become key prefixes ending in
// that separator. Everything here is pure string manipulation.

/// The canonical separator used in keys.
pub const SEPARATOR: char = '/';

/// Canonicalize `path` into a backend-agnostic key by replacing every
/// backslash with a forward slash.
///
/// Idempotent: `normalize(&normalize(p)) == normalize(p)`.
///
/// ```rust
/// use kvfs_storage::path::normalize;
///
/// assert_eq!(normalize("data\\default-user\\settings.json"), "data/default-user/settings.json");
/// assert_eq!(normalize("data/default-user/settings.json"), "data/default-user/settings.json");
/// ```
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// True if the path explicitly denotes a directory (ends in a separator of
/// either convention).
pub fn has_directory_hint(path: &str) -> bool {
    path.ends_with('/') || path.ends_with('\\')
}

/// The key prefix shared by everything inside directory `dir`.
///
/// The empty path (or a bare separator) is the root and yields the empty
/// prefix, so scanning it matches every key.
pub fn directory_prefix(dir: &str) -> String {
    let key = normalize(dir);
    let trimmed = key.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}{}", trimmed, SEPARATOR)
    }
}

/// True if `path` names the root, i.e. its directory prefix is empty and
/// would match every key.
pub fn is_root(path: &str) -> bool {
    directory_prefix(path).is_empty()
}

/// The first path segment of `key` below `prefix`, i.e. the name of the
/// immediate child of the directory that `prefix` denotes.
///
/// Returns `None` if `key` is not under `prefix` or names the prefix itself.
pub fn immediate_child<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?
        .split(SEPARATOR)
        .next()
        .filter(|segment| !segment.is_empty())
}

/// Move `key` from under `from_prefix` to under `to_prefix`.
///
/// Returns `None` if `key` does not start with `from_prefix`.
pub fn rebase(key: &str, from_prefix: &str, to_prefix: &str) -> Option<String> {
    key.strip_prefix(from_prefix)
        .map(|suffix| format!("{}{}", to_prefix, suffix))
}
