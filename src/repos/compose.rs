//! Pure transforms over a [`RepoRecord`].
//!
//! Composition order is baseline first, managed paths appended: Go walks
//! GOPATH left to right and `go get` installs into the first entry, so the
//! user's original workspace keeps precedence over anything gopaths adds.

use std::path::Path;

use super::RepoRecord;
use crate::error::GopathsError;
use crate::utils::paths::{join_dir_list, resolve};

/// The GOPATH value to install for `record`.
pub fn compose(record: &RepoRecord) -> String {
    let managed = managed_segment(record);
    let baseline = record.baseline();
    match (baseline.is_empty(), managed.is_empty()) {
        (_, true) => baseline.to_string(),
        (true, false) => managed,
        (false, false) => join_dir_list([baseline, managed.as_str()]),
    }
}

/// The colon-joined active managed paths, without the baseline.
pub fn managed_segment(record: &RepoRecord) -> String {
    join_dir_list(record.active_paths())
}

/// Append each candidate not already managed. Returns the newly added paths.
pub fn add_paths<S: AsRef<str>>(
    record: &mut RepoRecord,
    candidates: &[S],
    cwd: &Path,
) -> Result<Vec<String>, GopathsError> {
    let mut added = Vec::new();
    for candidate in resolve_all(candidates, cwd)? {
        if record.managed_paths.contains(&candidate) {
            continue;
        }
        record.managed_paths.push(candidate.clone());
        added.push(candidate);
    }
    Ok(added)
}

/// Remove matching paths, or everything when `remove_all` is set.
///
/// Unmatched candidates are ignored. Returns the removed paths in their
/// former order.
pub fn remove_paths<S: AsRef<str>>(
    record: &mut RepoRecord,
    candidates: &[S],
    remove_all: bool,
    cwd: &Path,
) -> Result<Vec<String>, GopathsError> {
    if remove_all {
        record.disabled_paths.clear();
        return Ok(std::mem::take(&mut record.managed_paths));
    }

    let targets = resolve_all(candidates, cwd)?;
    let (removed, kept): (Vec<String>, Vec<String>) = std::mem::take(&mut record.managed_paths)
        .into_iter()
        .partition(|p| targets.contains(p));
    record.managed_paths = kept;
    record.disabled_paths.retain(|p| !removed.contains(p));
    Ok(removed)
}

/// Exclude managed paths from composition without forgetting them.
pub fn disable_paths<S: AsRef<str>>(
    record: &mut RepoRecord,
    candidates: &[S],
    cwd: &Path,
) -> Result<Vec<String>, GopathsError> {
    let mut disabled = Vec::new();
    for candidate in resolve_all(candidates, cwd)? {
        if !record.managed_paths.contains(&candidate) || record.is_disabled(&candidate) {
            continue;
        }
        record.disabled_paths.push(candidate.clone());
        disabled.push(candidate);
    }
    Ok(disabled)
}

/// Undo [`disable_paths`] for the given candidates.
pub fn enable_paths<S: AsRef<str>>(
    record: &mut RepoRecord,
    candidates: &[S],
    cwd: &Path,
) -> Result<Vec<String>, GopathsError> {
    let targets = resolve_all(candidates, cwd)?;
    let (enabled, still_disabled): (Vec<String>, Vec<String>) =
        std::mem::take(&mut record.disabled_paths)
            .into_iter()
            .partition(|p| targets.contains(p));
    record.disabled_paths = still_disabled;
    Ok(enabled)
}

/// Resolve every candidate up front so a failure leaves the record untouched.
fn resolve_all<S: AsRef<str>>(candidates: &[S], cwd: &Path) -> Result<Vec<String>, GopathsError> {
    candidates
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| !c.is_empty())
        .map(|c| resolve(c, cwd))
        .collect()
}
