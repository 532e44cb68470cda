//! Scanner: collects `.m` files under a root and runs the rule set on each.
//!
//! Produces one `CheckResult` per file, in sorted path order. Per-file work is
//! parallel, but results are gathered in task order before anything is
//! reported.

use crate::error::{Result, StyleError};
use crate::models::{CheckResult, Task};
use crate::rules::RuleSet;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Extension of files the checker and formatter act on.
pub const TARGET_EXT: &str = ".m";

/// Directory names pruned from the checker's traversal.
pub const SKIP_DIRS: &[&str] = &[".git", "node_modules", ".deploy_git"];

/// Check every `.m` file under `root` with `rules`.
pub fn scan(root: &Path, rules: &RuleSet) -> Result<Vec<CheckResult>> {
    if !root.is_dir() {
        return Err(StyleError::RootNotFound(root.to_path_buf()));
    }
    let root = fs::canonicalize(root)?;
    let tasks: Vec<Task> = collect_files(&root, true)
        .into_iter()
        .map(|p| Task::new(&root, p))
        .collect();
    debug!(root = %root.display(), files = tasks.len(), "collected tasks");

    Ok(tasks.into_par_iter().map(|task| check_task(task, rules)).collect())
}

/// Read a task's file and run every rule on it.
pub fn check_task(task: Task, rules: &RuleSet) -> CheckResult {
    let source = fs::read_to_string(&task.path).map_err(|source| StyleError::FileRead {
        path: task.path.clone(),
        source,
    });
    if let Err(e) = &source {
        warn!(error = %e, "file could not be read");
    }
    let diagnostics = rules.run(source.as_deref());
    CheckResult::new(task, diagnostics)
}

/// Collect files ending in `TARGET_EXT` under `root`, sorted by path.
///
/// With `prune`, directories named in `SKIP_DIRS` are not descended into.
/// Entries that cannot be read are skipped.
pub fn collect_files(root: &Path, prune: bool) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !(prune && is_skipped_dir(e)))
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && e.file_name().to_string_lossy().ends_with(TARGET_EXT))
        .map(DirEntry::into_path)
        .collect();
    files.sort();
    files
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && SKIP_DIRS.contains(&entry.file_name().to_string_lossy().as_ref())
}
