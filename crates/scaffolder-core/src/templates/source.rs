//! Local template root discovery and catalog loading

use super::manifest::{RootManifest, TemplateEntry};
use crate::error::{IoOp, Result, ScaffoldError};
use crate::product::ProductConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Catalog file at the top of every template root
pub const CATALOG_FILE: &str = "template.yaml";

/// A directory holding the catalog and one subdirectory per template layer
#[derive(Debug, Clone)]
pub struct TemplateRoot {
    path: PathBuf,
}

impl TemplateRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the root: explicit path, then the product's env var, then its default
    pub fn from_config<C: ProductConfig>(config: &C, explicit: Option<PathBuf>) -> Self {
        let path = explicit
            .or_else(|| std::env::var_os(config.template_root_env()).map(PathBuf::from))
            .unwrap_or_else(|| config.default_template_root());
        debug!("Using template root {}", path.display());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_catalog(&self) -> Result<RootManifest> {
        let catalog_path = self.path.join(CATALOG_FILE);
        let content = fs::read_to_string(&catalog_path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ScaffoldError::not_found(&catalog_path),
            _ => ScaffoldError::io(IoOp::Read, &catalog_path)(e),
        })?;
        serde_yaml::from_str(&content).map_err(|source| ScaffoldError::Catalog {
            path: catalog_path,
            source,
        })
    }

    /// Absolute-or-relative paths of an entry's layers, in render order
    pub fn layer_paths(&self, entry: &TemplateEntry) -> Vec<PathBuf> {
        entry
            .layer_names()
            .into_iter()
            .map(|layer| self.path.join(layer))
            .collect()
    }
}
