//! Template catalog, rendering and manifest merging
//!
//! This module provides:
//! - Catalog types (RootManifest, TemplateEntry) and the local template root
//! - Tree rendering with dotfile renames and dependency-cache skipping
//! - Field-level merging of the project manifest

pub mod manifest;
pub mod merge;
pub mod renderer;
pub mod source;

pub use manifest::{RootManifest, TemplateEntry};
pub use merge::{merge_documents, merge_manifest_file, seed_manifest};
pub use renderer::{render, RenderReport};
pub use source::{TemplateRoot, CATALOG_FILE};
