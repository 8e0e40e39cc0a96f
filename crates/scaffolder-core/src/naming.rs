//! Reserved names and the name transformations applied while scaffolding

use regex::Regex;
use std::ffi::{OsStr, OsString};
use std::sync::OnceLock;

/// Directory holding installed third-party packages; never copied from a template
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Project manifest; merged field-by-field instead of overwritten
pub const MANIFEST_FILE: &str = "package.json";

/// Version control directory tolerated in an otherwise empty target
pub const GIT_DIR: &str = ".git";

/// Version written into a freshly seeded manifest
pub const INITIAL_VERSION: &str = "0.0.0";

/// Apply the dotfile rename rule: a leading `_` becomes a leading `.`
///
/// Templates store hidden files as `_gitignore`, `_npmrc`, ... because package
/// tooling drops literal dotfiles. A bare `_` is left alone.
pub fn rendered_file_name(name: &OsStr) -> OsString {
    match name.to_str().and_then(|s| s.strip_prefix('_')) {
        Some(rest) if !rest.is_empty() => OsString::from(format!(".{}", rest)),
        _ => name.to_os_string(),
    }
}

pub fn is_dependency_cache(name: &OsStr) -> bool {
    name == DEPENDENCY_CACHE_DIR
}

pub fn is_manifest(name: &OsStr) -> bool {
    name == MANIFEST_FILE
}

/// Normalize user input for the target directory (trim, drop trailing separators)
pub fn format_target_dir(input: &str) -> String {
    let trimmed = input.trim();
    let stripped = trimmed.trim_end_matches(['/', '\\']);
    if stripped.is_empty() && !trimmed.is_empty() {
        // "/" on its own
        return trimmed[..1].to_string();
    }
    stripped.to_string()
}

fn package_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:@[a-z\d\-*~][a-z\d\-*._~]*/)?[a-z\d\-~][a-z\d\-._~]*$")
            .expect("package name pattern is valid")
    })
}

/// Check a name against the npm package name grammar
pub fn is_valid_package_name(name: &str) -> bool {
    package_name_pattern().is_match(name)
}

/// Turn an arbitrary project name into a valid package name
pub fn to_valid_package_name(name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();

    let lowered = name.trim().to_lowercase();
    let dashed = WHITESPACE
        .get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
        .replace_all(&lowered, "-");
    let unprefixed = dashed
        .strip_prefix(['.', '_'])
        .unwrap_or(&dashed);
    DISALLOWED
        .get_or_init(|| Regex::new(r"[^a-z\d\-~]+").expect("disallowed pattern is valid"))
        .replace_all(unprefixed, "-")
        .into_owned()
}
