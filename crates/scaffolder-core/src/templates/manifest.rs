//! Template catalog types and parsing

use crate::error::{Result, ScaffoldError};
use serde::Deserialize;

/// One selectable framework in the catalog
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Identifier used with `--template`
    pub name: String,

    /// Label shown in the framework prompt (defaults to `name`)
    #[serde(default)]
    pub display: Option<String>,

    /// Short hint shown next to the label
    #[serde(default)]
    pub description: String,

    /// Terminal color for the label (red, green, yellow, blue, magenta, cyan)
    #[serde(default)]
    pub color: Option<String>,

    /// Template directories rendered in order; later layers merge onto earlier ones
    #[serde(default)]
    pub layers: Vec<String>,
}

impl TemplateEntry {
    pub fn display_name(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.name)
    }

    /// Layer directories, falling back to a single layer named after the entry
    pub fn layer_names(&self) -> Vec<&str> {
        if self.layers.is_empty() {
            vec![self.name.as_str()]
        } else {
            self.layers.iter().map(String::as_str).collect()
        }
    }
}

/// Root catalog (templates/template.yaml)
#[derive(Debug, Clone, Deserialize)]
pub struct RootManifest {
    /// Frameworks offered to the user, in prompt order
    pub templates: Vec<TemplateEntry>,
}

impl RootManifest {
    pub fn names(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.name.clone()).collect()
    }

    /// Look up a template by name (case-insensitive)
    pub fn find(&self, name: &str) -> Result<&TemplateEntry> {
        self.templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ScaffoldError::UnknownTemplate {
                name: name.to_string(),
                available: self.names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
templates:
  - name: vanilla
    display: Vanilla
    description: Plain JavaScript
    color: yellow
    layers: [base, vanilla]
  - name: react
"#;

    #[test]
    fn test_parse_catalog() {
        let root: RootManifest = serde_yaml::from_str(CATALOG).unwrap();
        assert_eq!(root.names(), vec!["vanilla", "react"]);

        let vanilla = &root.templates[0];
        assert_eq!(vanilla.display_name(), "Vanilla");
        assert_eq!(vanilla.color.as_deref(), Some("yellow"));
        assert_eq!(vanilla.layer_names(), vec!["base", "vanilla"]);
    }

    #[test]
    fn test_defaults_for_minimal_entry() {
        let root: RootManifest = serde_yaml::from_str(CATALOG).unwrap();
        let react = &root.templates[1];
        assert_eq!(react.display_name(), "react");
        assert_eq!(react.description, "");
        assert_eq!(react.layer_names(), vec!["react"]);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let root: RootManifest = serde_yaml::from_str(CATALOG).unwrap();
        assert_eq!(root.find("React").unwrap().name, "react");
    }

    #[test]
    fn test_find_unknown_lists_available() {
        let root: RootManifest = serde_yaml::from_str(CATALOG).unwrap();
        match root.find("svelte") {
            Err(ScaffoldError::UnknownTemplate { name, available }) => {
                assert_eq!(name, "svelte");
                assert_eq!(available, vec!["vanilla", "react"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
