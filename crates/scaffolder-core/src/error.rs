//! Error types for the scaffolding core

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Filesystem operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Inspect,
    List,
    Read,
    Write,
    CreateDir,
    RemoveFile,
    RemoveDir,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            IoOp::Inspect => "inspecting",
            IoOp::List => "listing",
            IoOp::Read => "reading",
            IoOp::Write => "writing",
            IoOp::CreateDir => "creating directory",
            IoOp::RemoveFile => "removing file",
            IoOp::RemoveDir => "removing directory",
        };
        f.write_str(verb)
    }
}

/// Which side of a manifest merge a document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestSide {
    /// The manifest already present in the destination tree
    Destination,
    /// The manifest shipped in the template tree
    Template,
}

impl fmt::Display for ManifestSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestSide::Destination => f.write_str("destination"),
            ManifestSide::Template => f.write_str("template"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Template path not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error while {op} '{}'", .path.display())]
    Io {
        op: IoOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {side} manifest '{}'", .path.display())]
    Parse {
        side: ManifestSide,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse template catalog '{}'", .path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Template '{name}' not found. Available templates: {}", .available.join(", "))]
    UnknownTemplate { name: String, available: Vec<String> },

    #[error("Target directory '{}' is not empty and overwrite was not confirmed", .path.display())]
    ConfirmationDenied { path: PathBuf },
}

impl ScaffoldError {
    /// Build a mapper for `map_err` that tags an I/O error with its operation and path
    pub fn io(op: IoOp, path: &Path) -> impl FnOnce(io::Error) -> ScaffoldError + '_ {
        move |source| ScaffoldError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn not_found(path: &Path) -> Self {
        ScaffoldError::NotFound {
            path: path.to_path_buf(),
        }
    }

    /// True for the normal "user declined" cancellation path
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ScaffoldError::ConfirmationDenied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_operation_and_path() {
        let err = ScaffoldError::io(IoOp::RemoveDir, Path::new("/tmp/app/src"))(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("removing directory"));
        assert!(message.contains("/tmp/app/src"));
    }

    #[test]
    fn test_unknown_template_lists_available() {
        let err = ScaffoldError::UnknownTemplate {
            name: "svelte".to_string(),
            available: vec!["vanilla".to_string(), "react".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Template 'svelte' not found. Available templates: vanilla, react"
        );
    }

    #[test]
    fn test_only_confirmation_denied_is_cancellation() {
        let denied = ScaffoldError::ConfirmationDenied {
            path: PathBuf::from("app"),
        };
        assert!(denied.is_cancellation());
        assert!(!ScaffoldError::not_found(Path::new("x")).is_cancellation());
    }
}
