//! Product configuration trait for CLI binaries
//!
//! Each binary built on this crate implements this trait to configure its
//! name, where templates live and what to print once a project is created.

use crate::package_manager::PackageManager;
use std::path::{Path, PathBuf};

/// Configuration trait for different CLI products
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Environment variable name for overriding the template root
    fn template_root_env(&self) -> &'static str;

    /// Template root used when neither a flag nor the env var is set
    fn default_template_root(&self) -> PathBuf;

    /// Project directory offered in the first prompt
    fn default_project_name(&self) -> &'static str {
        "starter-project"
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, package_manager: PackageManager) -> Vec<String> {
        let mut steps = Vec::new();

        let current = std::env::current_dir().ok();
        if current.as_deref() != Some(dir) {
            let shown = current
                .as_deref()
                .and_then(|cwd| dir.strip_prefix(cwd).ok())
                .unwrap_or(dir);
            let shown = shown.display().to_string();
            if shown.contains(' ') {
                steps.push(format!("cd \"{}\"", shown));
            } else {
                steps.push(format!("cd {}", shown));
            }
        }

        steps.push(package_manager.install_command().to_string());
        steps.push(package_manager.dev_command().to_string());
        steps
    }
}
