//! Gitignore template catalog.
//!
//! Loads the per-project-type pattern lists from:
//! - Embedded gitignore-templates.yaml (compiled into binary)
//! - Runtime YAML files (for testing/development)
//!
//! The catalog is keyed by exactly the [`ProjectType`] enumeration and is
//! never mutated after loading.

use super::parser::{GitignoreTemplate, TemplateConfig};
use crate::error::{Error, Result};
use crate::types::ProjectType;
use std::collections::HashMap;
use tracing::debug;

/// Embedded template YAML
const EMBEDDED_YAML: &str = include_str!("../../templates/gitignore-templates.yaml");

/// Static mapping from project type to ignore patterns
#[derive(Debug)]
pub struct TemplateCatalog {
    version: String,
    templates: HashMap<ProjectType, GitignoreTemplate>,
}

impl TemplateCatalog {
    /// Load the catalog compiled into the binary
    pub fn from_embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_YAML)
    }

    /// Load a catalog from a YAML string
    ///
    /// Every key must be a canonical project type identifier and every
    /// project type must be present.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config = TemplateConfig::from_yaml(yaml)?;
        Self::from_config(config)
    }

    fn from_config(config: TemplateConfig) -> Result<Self> {
        let mut templates = HashMap::new();

        for (key, template) in config.templates {
            let project_type = ProjectType::from_identifier(&key).ok_or_else(|| {
                Error::invalid_catalog(format!(
                    "unknown project type '{}' (expected one of: {})",
                    key,
                    ProjectType::available()
                ))
            })?;
            templates.insert(project_type, template);
        }

        let missing: Vec<&str> = ProjectType::all()
            .iter()
            .filter(|t| !templates.contains_key(t))
            .map(|t| t.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(Error::invalid_catalog(format!(
                "missing templates for: {}",
                missing.join(", ")
            )));
        }

        debug!(
            "Loaded gitignore catalog v{} with {} templates",
            config.version,
            templates.len()
        );

        Ok(Self {
            version: config.version,
            templates,
        })
    }

    /// Resolve an identifier to its pattern list
    ///
    /// Only exact canonical identifiers resolve. Anything else yields `None`
    /// so the caller can warn and continue without template entries.
    pub fn resolve(&self, identifier: &str) -> Option<&[String]> {
        let project_type = ProjectType::from_identifier(identifier)?;
        Some(self.patterns(project_type))
    }

    /// Pattern list for a project type
    pub fn patterns(&self, project_type: ProjectType) -> &[String] {
        self.templates
            .get(&project_type)
            .map(|t| t.patterns.as_slice())
            .unwrap_or_default()
    }

    /// Template description for a project type
    pub fn description(&self, project_type: ProjectType) -> &str {
        self.templates
            .get(&project_type)
            .map(|t| t.description.as_str())
            .unwrap_or_else(|| project_type.description())
    }

    /// All project types in enumeration order
    pub fn project_types(&self) -> Vec<ProjectType> {
        ProjectType::all()
    }

    /// Catalog format version
    pub fn version(&self) -> &str {
        &self.version
    }
}
