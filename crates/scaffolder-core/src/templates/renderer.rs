//! Template tree rendering: copy with dotfile renames, dependency-cache skipping
//! and manifest merging

use crate::atomic::write_atomic;
use crate::error::{IoOp, Result, ScaffoldError};
use crate::naming::{is_dependency_cache, is_manifest, rendered_file_name};
use crate::templates::merge::merge_manifest_file;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What a render pass did to the destination tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Destination files written byte-for-byte from the template
    pub written: Vec<PathBuf>,
    /// Destination manifests that received a field merge
    pub merged: Vec<PathBuf>,
    /// Template directories left out because they hold installed dependencies
    pub skipped: Vec<PathBuf>,
}

impl RenderReport {
    pub fn file_count(&self) -> usize {
        self.written.len() + self.merged.len()
    }

    pub fn extend(&mut self, other: RenderReport) {
        self.written.extend(other.written);
        self.merged.extend(other.merged);
        self.skipped.extend(other.skipped);
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(ScaffoldError::io(IoOp::Inspect, path))
}

/// Metadata for a source entry, mapping a missing entry to `NotFound`
fn source_metadata(path: &Path) -> Result<fs::Metadata> {
    fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScaffoldError::not_found(path),
        _ => ScaffoldError::io(IoOp::Inspect, path)(e),
    })
}

/// Render the template at `source` onto `dest`
///
/// Directories are created before their entries are queued, so every file's
/// parent exists by the time it is written. Processing stops at the first
/// error; anything already written stays.
///
/// The dotfile rename applies to destination names. Below a directory these
/// mirror the source names; for a single-file `source` it is `dest`'s own name,
/// so `render("_npmrc", "out/config")` writes `out/config`.
pub fn render(source: &Path, dest: &Path) -> Result<RenderReport> {
    let mut report = RenderReport::default();
    let mut pending = vec![(absolute(source)?, absolute(dest)?)];

    while let Some((src, dst)) = pending.pop() {
        let meta = source_metadata(&src)?;

        if meta.is_dir() {
            if src.file_name().is_some_and(is_dependency_cache) {
                debug!("Skipping dependency cache {}", src.display());
                report.skipped.push(src);
                continue;
            }

            fs::create_dir_all(&dst).map_err(ScaffoldError::io(IoOp::CreateDir, &dst))?;

            let mut entries = Vec::new();
            for entry in fs::read_dir(&src).map_err(ScaffoldError::io(IoOp::List, &src))? {
                let entry = entry.map_err(ScaffoldError::io(IoOp::List, &src))?;
                entries.push(entry.file_name());
            }
            // Reverse order on the stack so entries pop in name order
            entries.sort_unstable_by(|a, b| b.cmp(a));
            pending.extend(
                entries
                    .into_iter()
                    .map(|name| (src.join(&name), dst.join(&name))),
            );
        } else {
            let target = dst
                .file_name()
                .map(|name| dst.with_file_name(rendered_file_name(name)))
                .unwrap_or(dst);
            render_file(&src, &target, meta, &mut report)?;
        }
    }

    Ok(report)
}

fn render_file(
    src: &Path,
    target: &Path,
    meta: fs::Metadata,
    report: &mut RenderReport,
) -> Result<()> {
    let merge = target.file_name().is_some_and(is_manifest) && target.is_file();

    if merge {
        merge_manifest_file(src, target)?;
        report.merged.push(target.to_path_buf());
        return Ok(());
    }

    let contents = fs::read(src).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScaffoldError::not_found(src),
        _ => ScaffoldError::io(IoOp::Read, src)(e),
    })?;
    write_atomic(target, &contents, Some(meta.permissions()))?;

    debug!("Copied {} -> {}", src.display(), target.display());
    report.written.push(target.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_missing_source_is_not_found() {
        let dir = tempdir().unwrap();
        let err = render(&dir.path().join("nope"), &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, ScaffoldError::NotFound { .. }));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_copies_nested_tree_and_renames_dotfiles() -> Result<()> {
        let dir = tempdir().unwrap();
        let src = dir.path().join("template");
        let out = dir.path().join("out");
        write(&src, "_gitignore", "node_modules\ndist\n");
        write(&src, "src/main.js", "console.log('hi')\n");
        write(&src, "src/_env.local", "KEY=1\n");
        write(&src, "public/my_icon.svg", "<svg/>");

        let report = render(&src, &out)?;

        assert_eq!(
            fs::read_to_string(out.join(".gitignore")).unwrap(),
            "node_modules\ndist\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("src/main.js")).unwrap(),
            "console.log('hi')\n"
        );
        assert!(out.join("src/.env.local").is_file());
        assert!(out.join("public/my_icon.svg").is_file());
        assert!(!out.join("_gitignore").exists());
        assert_eq!(report.written.len(), 4);
        assert!(report.merged.is_empty());
        Ok(())
    }

    #[test]
    fn test_underscore_directories_keep_their_name() -> Result<()> {
        let dir = tempdir().unwrap();
        let src = dir.path().join("template");
        write(&src, "_layouts/base.html", "<html/>");

        render(&src, &dir.path().join("out"))?;
        assert!(dir.path().join("out/_layouts/base.html").is_file());
        Ok(())
    }

    #[test]
    fn test_dependency_cache_is_skipped_at_any_depth() -> Result<()> {
        let dir = tempdir().unwrap();
        let src = dir.path().join("template");
        let out = dir.path().join("out");
        write(&src, "node_modules/leftover.txt", "x");
        write(&src, "packages/ui/node_modules/dep/index.js", "x");
        write(&src, "packages/ui/index.js", "export {}");

        let report = render(&src, &out)?;

        assert!(!out.join("node_modules").exists());
        assert!(!out.join("packages/ui/node_modules").exists());
        assert!(out.join("packages/ui/index.js").is_file());
        assert_eq!(report.skipped.len(), 2);
        Ok(())
    }

    #[test]
    fn test_manifest_merges_into_existing() -> Result<()> {
        let dir = tempdir().unwrap();
        let src = dir.path().join("template");
        let out = dir.path().join("out");
        write(&src, "package.json", r#"{"version":"1.0.0","deps":{"a":"1"}}"#);
        write(&out, "package.json", r#"{"name":"x","deps":{"b":"2"}}"#);

        let report = render(&src, &out)?;

        let doc: Value =
            serde_json::from_str(&fs::read_to_string(out.join("package.json")).unwrap()).unwrap();
        assert_eq!(
            doc,
            json!({"name": "x", "version": "1.0.0", "deps": {"a": "1", "b": "2"}})
        );
        assert_eq!(report.merged, vec![absolute(&out.join("package.json"))?]);
        Ok(())
    }

    #[test]
    fn test_manifest_without_existing_is_copied_verbatim() -> Result<()> {
        let dir = tempdir().unwrap();
        let src = dir.path().join("template");
        let out = dir.path().join("out");
        let raw = "{\"name\":   \"tpl\"}";
        write(&src, "package.json", raw);

        render(&src, &out)?;
        assert_eq!(fs::read_to_string(out.join("package.json")).unwrap(), raw);
        Ok(())
    }

    #[test]
    fn test_other_files_overwrite_without_merging() -> Result<()> {
        let dir = tempdir().unwrap();
        let src = dir.path().join("template");
        let out = dir.path().join("out");
        write(&src, "tsconfig.json", r#"{"a":1}"#);
        write(&out, "tsconfig.json", r#"{"b":2}"#);
        write(&out, "README.md", "mine");

        render(&src, &out)?;
        assert_eq!(fs::read_to_string(out.join("tsconfig.json")).unwrap(), r#"{"a":1}"#);
        assert_eq!(fs::read_to_string(out.join("README.md")).unwrap(), "mine");
        Ok(())
    }

    #[test]
    fn test_bad_manifest_fails_with_parse_error() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("template");
        let out = dir.path().join("out");
        write(&src, "package.json", r#"{"version":"1.0.0"}"#);
        write(&out, "package.json", "not json at all");

        let err = render(&src, &out).unwrap_err();
        assert!(matches!(err, ScaffoldError::Parse { .. }));
        assert_eq!(
            fs::read_to_string(out.join("package.json")).unwrap(),
            "not json at all"
        );
    }

    #[test]
    fn test_single_file_source_is_renamed() -> Result<()> {
        let dir = tempdir().unwrap();
        write(dir.path(), "_npmrc", "registry=x");
        fs::create_dir(dir.path().join("out")).unwrap();

        render(&dir.path().join("_npmrc"), &dir.path().join("out/_npmrc"))?;
        assert_eq!(
            fs::read_to_string(dir.path().join("out/.npmrc")).unwrap(),
            "registry=x"
        );
        Ok(())
    }

    #[test]
    fn test_single_file_source_keeps_chosen_dest_name() -> Result<()> {
        let dir = tempdir().unwrap();
        write(dir.path(), "_npmrc", "registry=x");
        fs::create_dir(dir.path().join("out")).unwrap();

        let report = render(&dir.path().join("_npmrc"), &dir.path().join("out/config"))?;

        assert_eq!(
            fs::read_to_string(dir.path().join("out/config")).unwrap(),
            "registry=x"
        );
        assert!(!dir.path().join("out/.npmrc").exists());
        assert_eq!(report.written, vec![absolute(&dir.path().join("out/config"))?]);
        Ok(())
    }

    #[test]
    fn test_render_twice_is_stable() -> Result<()> {
        let dir = tempdir().unwrap();
        let src = dir.path().join("template");
        let out = dir.path().join("out");
        write(&src, "_gitignore", "dist");
        write(&src, "package.json", r#"{"scripts":{"dev":"vite"}}"#);
        write(&out, "package.json", r#"{"name":"app"}"#);

        render(&src, &out)?;
        let first = fs::read_to_string(out.join("package.json")).unwrap();
        render(&src, &out)?;
        let second = fs::read_to_string(out.join("package.json")).unwrap();
        assert_eq!(first, second);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_copied_files_keep_permissions() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let src = dir.path().join("template");
        write(&src, "bin/run.sh", "#!/bin/sh\n");
        fs::set_permissions(src.join("bin/run.sh"), fs::Permissions::from_mode(0o755)).unwrap();

        render(&src, &dir.path().join("out"))?;
        let mode = fs::metadata(dir.path().join("out/bin/run.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
        Ok(())
    }
}
