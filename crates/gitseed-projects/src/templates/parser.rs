//! YAML template parsing and structure definitions.
//!
//! Parses gitignore-templates.yaml into strongly-typed Rust structures.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete template configuration from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub version: String,
    pub templates: BTreeMap<String, GitignoreTemplate>,
}

/// Gitignore template for a single project type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitignoreTemplate {
    pub description: String,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl TemplateConfig {
    /// Parse template configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r#"
version: "1.0"
templates:
  rust:
    description: "Rust crate"
    patterns:
      - target/
      - "*.rs.bk"
"#;

        let config = TemplateConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.templates.len(), 1);

        let rust = &config.templates["rust"];
        assert_eq!(rust.description, "Rust crate");
        assert_eq!(rust.patterns, vec!["target/", "*.rs.bk"]);
    }

    #[test]
    fn test_patterns_default_to_empty() {
        let yaml = r#"
version: "1.0"
templates:
  go:
    description: "Go module"
"#;

        let config = TemplateConfig::from_yaml(yaml).unwrap();
        assert!(config.templates["go"].patterns.is_empty());
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(TemplateConfig::from_yaml("templates: [1, 2").is_err());
    }
}
