//! The scoped scaffold operation tying reconciliation and rendering together

use crate::error::{IoOp, Result, ScaffoldError};
use crate::naming::MANIFEST_FILE;
use crate::reconcile::{classify_for_reuse, empty_directory, Reuse};
use crate::templates::merge::seed_manifest;
use crate::templates::renderer::{render, RenderReport};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// What to do when the target holds content that needs confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Stop without touching the target
    #[default]
    Cancel,
    /// Remove everything in the target, then scaffold
    Empty,
    /// Keep existing files and render on top of them
    Keep,
}

/// Inputs for one scaffold run
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    /// Project directory; resolved to an absolute path before use
    pub target: PathBuf,
    /// Name written into the initial manifest
    pub package_name: String,
    /// Template directories, rendered in order
    pub layers: Vec<PathBuf>,
    pub policy: OverwritePolicy,
}

#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    /// Absolute project directory
    pub target: PathBuf,
    /// Classification of the target before anything was changed
    pub reuse: Reuse,
    pub emptied: bool,
    pub render: RenderReport,
}

/// Scaffold a project into `request.target`
///
/// The caller must own the target for the duration of the call; no other
/// process may modify it concurrently. On `ConfirmationDenied` the target has
/// not been modified.
pub fn scaffold(request: &ScaffoldRequest) -> Result<ScaffoldReport> {
    let target = std::path::absolute(&request.target)
        .map_err(ScaffoldError::io(IoOp::Inspect, &request.target))?;
    let reuse = classify_for_reuse(&target)?;

    let emptied = match (reuse.needs_confirmation(), request.policy) {
        (true, OverwritePolicy::Cancel) => {
            return Err(ScaffoldError::ConfirmationDenied { path: target });
        }
        (true, OverwritePolicy::Empty) => {
            info!("Emptying {}", target.display());
            empty_directory(&target)?;
            true
        }
        _ => false,
    };

    info!("Scaffolding {} into {}", request.package_name, target.display());
    fs::create_dir_all(&target).map_err(ScaffoldError::io(IoOp::CreateDir, &target))?;
    seed_manifest(&target.join(MANIFEST_FILE), &request.package_name)?;

    let mut report = RenderReport::default();
    for layer in &request.layers {
        report.extend(render(layer, &target)?);
    }

    info!(
        "Scaffolded {} files ({} merged) into {}",
        report.file_count(),
        report.merged.len(),
        target.display()
    );

    Ok(ScaffoldReport {
        target,
        reuse,
        emptied,
        render: report,
    })
}
