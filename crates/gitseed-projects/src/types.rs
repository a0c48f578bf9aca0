//! Core types for repository bootstrap

use serde::{Deserialize, Serialize};

/// Project type enumeration
///
/// The gitignore template catalog is keyed by exactly these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Node.js application
    Node,
    /// Python application
    Python,
    /// Java application (Maven or Gradle)
    Java,
    /// C# / .NET application
    Csharp,
    /// Go module
    Go,
    /// Rust crate
    Rust,
    /// PHP application (Composer)
    Php,
    /// Ruby application (Bundler)
    Ruby,
    /// React frontend
    React,
    /// Vue frontend
    Vue,
    /// Angular frontend
    Angular,
    /// Flutter application
    Flutter,
    /// Unity game project
    Unity,
}

impl ProjectType {
    /// Get all available project types
    pub fn all() -> Vec<Self> {
        vec![
            Self::Node,
            Self::Python,
            Self::Java,
            Self::Csharp,
            Self::Go,
            Self::Rust,
            Self::Php,
            Self::Ruby,
            Self::React,
            Self::Vue,
            Self::Angular,
            Self::Flutter,
            Self::Unity,
        ]
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Python => "python",
            Self::Java => "java",
            Self::Csharp => "csharp",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Php => "php",
            Self::Ruby => "ruby",
            Self::React => "react",
            Self::Vue => "vue",
            Self::Angular => "angular",
            Self::Flutter => "flutter",
            Self::Unity => "unity",
        }
    }

    /// Get description for the project type
    pub fn description(&self) -> &'static str {
        match self {
            Self::Node => "Node.js application",
            Self::Python => "Python application",
            Self::Java => "Java application (Maven/Gradle)",
            Self::Csharp => "C# / .NET application",
            Self::Go => "Go module",
            Self::Rust => "Rust crate",
            Self::Php => "PHP application",
            Self::Ruby => "Ruby application",
            Self::React => "React application",
            Self::Vue => "Vue.js application",
            Self::Angular => "Angular application",
            Self::Flutter => "Flutter application",
            Self::Unity => "Unity project",
        }
    }

    /// Get aliases for this project type
    pub fn aliases(&self) -> Vec<&'static str> {
        match self {
            Self::Node => vec!["nodejs", "javascript", "js", "typescript", "ts"],
            Self::Python => vec!["py", "python3"],
            Self::Java => vec!["maven", "gradle", "kotlin"],
            Self::Csharp => vec!["c#", "dotnet", ".net", "cs"],
            Self::Go => vec!["golang"],
            Self::Rust => vec!["rs", "cargo"],
            Self::Php => vec!["composer", "laravel"],
            Self::Ruby => vec!["rb", "rails"],
            Self::React => vec!["reactjs", "nextjs"],
            Self::Vue => vec!["vuejs", "nuxt"],
            Self::Angular => vec!["ng"],
            Self::Flutter => vec!["dart"],
            Self::Unity => vec!["unity3d"],
        }
    }

    /// Parse from the canonical identifier only (no aliases)
    pub fn from_identifier(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.as_str() == s)
    }

    /// Parse from string, checking aliases
    pub fn from_str_with_aliases(s: &str) -> Option<Self> {
        let s_lower = s.trim().to_lowercase();

        for project_type in Self::all() {
            if project_type.as_str() == s_lower {
                return Some(project_type);
            }

            if project_type.aliases().contains(&s_lower.as_str()) {
                return Some(project_type);
            }
        }

        None
    }

    /// Comma separated list of canonical identifiers, for error messages
    pub fn available() -> String {
        Self::all()
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProjectType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_with_aliases(s)
            .ok_or_else(|| crate::error::Error::unknown_project_type(s, Self::available()))
    }
}

/// Git author identity used for the initial commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitIdentity {
    /// Git user name
    pub name: String,

    /// Git user email
    pub email: String,
}

impl GitIdentity {
    /// Create a new identity
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Validate the identity
    pub fn validate(&self) -> Result<(), crate::error::Error> {
        if self.name.trim().is_empty() {
            return Err(crate::error::Error::invalid_git_config(
                "Git user name cannot be empty",
            ));
        }

        if self.email.trim().is_empty() {
            return Err(crate::error::Error::invalid_git_config(
                "Git user email cannot be empty",
            ));
        }

        if !self.email.contains('@') {
            return Err(crate::error::Error::invalid_git_config(
                "Git user email must contain @",
            ));
        }

        Ok(())
    }
}
