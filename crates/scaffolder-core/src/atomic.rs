//! Whole-file writes that either land completely or leave the old file in place

use crate::error::{IoOp, Result, ScaffoldError};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `contents` to `path` through a sibling temp file and an atomic rename
///
/// With `permissions: None` an existing file keeps its permissions and a new
/// file gets the platform default.
pub fn write_atomic(
    path: &Path,
    contents: &[u8],
    permissions: Option<fs::Permissions>,
) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let permissions = match permissions {
        Some(permissions) => Some(permissions),
        None => match fs::metadata(path) {
            Ok(meta) => Some(meta.permissions()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => default_permissions(),
            Err(e) => return Err(ScaffoldError::io(IoOp::Inspect, path)(e)),
        },
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(ScaffoldError::io(IoOp::Write, path))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(ScaffoldError::io(IoOp::Write, path))?;
    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(ScaffoldError::io(IoOp::Write, path))?;
    }

    tmp.persist(path)
        .map_err(|e| ScaffoldError::io(IoOp::Write, path)(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_and_replaces() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.txt");

        write_atomic(&path, b"first", None)?;
        assert_eq!(fs::read(&path).unwrap(), b"first");

        write_atomic(&path, b"second", None)?;
        assert_eq!(fs::read(&path).unwrap(), b"second");

        // Only the target remains, no stray temp files
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        Ok(())
    }

    #[test]
    fn test_failed_write_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-parent").join("file.txt");

        let err = write_atomic(&path, b"data", None).unwrap_err();
        assert!(matches!(err, ScaffoldError::Io { op: IoOp::Write, .. }));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_is_world_readable() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        write_atomic(&path, b"{}", None)?;

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        Ok(())
    }
}
