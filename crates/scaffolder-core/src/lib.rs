//! Scaffolder Core - Shared library for project scaffolding CLIs
//!
//! This library provides the core functionality for scaffolding projects from
//! local template trees. Binaries supply a [`ProductConfig`] and get the
//! interactive flow from the optional `tui` module.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Directory reconciliation, template rendering, manifest merging
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and the scoped [`scaffold`] operation
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{scaffold, OverwritePolicy, ScaffoldRequest, TemplateRoot};
//!
//! let root = TemplateRoot::new("templates");
//! let catalog = root.load_catalog()?;
//! let entry = catalog.find("react")?;
//!
//! let report = scaffold(&ScaffoldRequest {
//!     target: "my-app".into(),
//!     package_name: "my-app".to_string(),
//!     layers: root.layer_paths(entry),
//!     policy: OverwritePolicy::Cancel,
//! })?;
//! ```

mod atomic;

pub mod error;
pub mod naming;
pub mod package_manager;
pub mod product;
pub mod project;
pub mod reconcile;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{IoOp, ManifestSide, Result, ScaffoldError};
pub use package_manager::PackageManager;
pub use product::ProductConfig;
pub use project::{scaffold, OverwritePolicy, ScaffoldReport, ScaffoldRequest};
pub use reconcile::{classify_for_reuse, empty_directory, Reuse};
pub use templates::{render, RenderReport, RootManifest, TemplateEntry, TemplateRoot};

#[cfg(feature = "tui")]
pub use tui::run;
