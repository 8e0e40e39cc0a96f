//! Target directory reconciliation
//!
//! Decides whether a target can be scaffolded into without asking, and empties
//! it once the caller has authorization to do so.

use crate::error::{IoOp, Result, ScaffoldError};
use crate::naming::GIT_DIR;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How safe it is to scaffold into a target path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reuse {
    /// Nothing exists at the path
    Missing,
    /// Directory with no entries
    SafeEmpty,
    /// Directory whose only entry is `.git`
    SafeGitOnly,
    /// Anything else; destructive action needs explicit confirmation
    NeedsConfirmation,
}

impl Reuse {
    pub fn needs_confirmation(self) -> bool {
        matches!(self, Reuse::NeedsConfirmation)
    }
}

/// Classify `path` by listing its immediate children (read-only)
pub fn classify_for_reuse(path: &Path) -> Result<Reuse> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Reuse::Missing),
        Err(e) => return Err(ScaffoldError::io(IoOp::Inspect, path)(e)),
    };
    if !meta.is_dir() {
        return Ok(Reuse::NeedsConfirmation);
    }

    let mut names = Vec::with_capacity(2);
    for entry in fs::read_dir(path).map_err(ScaffoldError::io(IoOp::List, path))? {
        let entry = entry.map_err(ScaffoldError::io(IoOp::List, path))?;
        names.push(entry.file_name());
        if names.len() > 1 {
            break;
        }
    }

    Ok(match names.as_slice() {
        [] => Reuse::SafeEmpty,
        [only] if only == GIT_DIR => Reuse::SafeGitOnly,
        _ => Reuse::NeedsConfirmation,
    })
}

/// Treat "already gone" as success for removals
fn ignore_missing(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Delete everything below `path`, leaving `path` itself in place
///
/// Walks an explicit stack in post-order: a directory is revisited and removed
/// only after all of its descendants are gone. A symlinked `path` resolves
/// the same way [`classify_for_reuse`] sees it: the linked directory is emptied
/// and the link kept. Symlinks below `path` are removed, not followed. A
/// missing `path` is a no-op; a non-directory at `path` is removed.
///
/// There is no rollback: entries deleted before an error stay deleted.
pub fn empty_directory(path: &Path) -> Result<()> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ScaffoldError::io(IoOp::Inspect, path)(e)),
    };
    if !meta.is_dir() {
        return ignore_missing(fs::remove_file(path))
            .map_err(ScaffoldError::io(IoOp::RemoveFile, path));
    }

    // (entry, children already queued)
    let mut stack: Vec<(PathBuf, bool)> = Vec::new();
    push_children(path, &mut stack)?;

    while let Some((entry, expanded)) = stack.pop() {
        if expanded {
            ignore_missing(fs::remove_dir(&entry))
                .map_err(ScaffoldError::io(IoOp::RemoveDir, &entry))?;
            debug!("Removed directory {}", entry.display());
            continue;
        }

        let meta = match fs::symlink_metadata(&entry) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ScaffoldError::io(IoOp::Inspect, &entry)(e)),
        };

        if meta.is_dir() {
            stack.push((entry.clone(), true));
            push_children(&entry, &mut stack)?;
        } else {
            ignore_missing(fs::remove_file(&entry))
                .map_err(ScaffoldError::io(IoOp::RemoveFile, &entry))?;
            debug!("Removed file {}", entry.display());
        }
    }

    Ok(())
}

fn push_children(dir: &Path, stack: &mut Vec<(PathBuf, bool)>) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ScaffoldError::io(IoOp::List, dir)(e)),
    };
    for entry in entries {
        let entry = entry.map_err(ScaffoldError::io(IoOp::List, dir))?;
        stack.push((entry.path(), false));
    }
    Ok(())
}
