//! Project type auto-detection from directory contents.
//!
//! Detection runs in two steps:
//! - [`DetectionEvidence::gather`] takes a one-time snapshot of the target
//!   directory (top-level names plus the package manifest content)
//! - [`ProjectDetector::detect`] evaluates a fixed, priority-ordered rule
//!   table against that snapshot
//!
//! Rules are independent: a directory can match several of them and each
//! rule contributes at most one type. The first candidate is the
//! recommended one. An empty result is normal and means the operator picks
//! a type by hand.

use crate::error::Result;
use crate::types::ProjectType;
use camino::Utf8Path;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Package manifest inspected for framework markers
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Read-only snapshot of the facts detection rules look at
#[derive(Debug, Clone, Default)]
pub struct DetectionEvidence {
    files: BTreeSet<String>,
    dirs: BTreeSet<String>,
    package_manifest: Option<String>,
}

impl DetectionEvidence {
    /// Snapshot the top level of `dir`
    ///
    /// Symlinks are classified by their target, so a linked `Assets/`
    /// counts as a directory. Dangling links are recorded as files.
    pub async fn gather(dir: &Utf8Path) -> Result<Self> {
        let mut evidence = Self::default();

        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };

            let is_dir = match tokio::fs::metadata(entry.path()).await {
                Ok(metadata) => metadata.is_dir(),
                Err(_) => entry.file_type().await?.is_dir(),
            };

            if is_dir {
                evidence.dirs.insert(name);
            } else {
                evidence.files.insert(name);
            }
        }

        if evidence.files.contains(PACKAGE_MANIFEST) {
            match tokio::fs::read_to_string(dir.join(PACKAGE_MANIFEST)).await {
                Ok(content) => evidence.package_manifest = Some(content),
                Err(e) => {
                    warn!("Could not read {}: {}", PACKAGE_MANIFEST, e);
                    evidence.package_manifest = Some(String::new());
                }
            }
        }

        debug!(
            "Gathered detection evidence: {} files, {} directories",
            evidence.files.len(),
            evidence.dirs.len()
        );

        Ok(evidence)
    }

    /// Add a file name to the snapshot
    pub fn with_file(mut self, name: impl Into<String>) -> Self {
        self.files.insert(name.into());
        self
    }

    /// Add a directory name to the snapshot
    pub fn with_dir(mut self, name: impl Into<String>) -> Self {
        self.dirs.insert(name.into());
        self
    }

    /// Add a package manifest with the given content
    pub fn with_package_manifest(mut self, content: impl Into<String>) -> Self {
        self.files.insert(PACKAGE_MANIFEST.to_string());
        self.package_manifest = Some(content.into());
        self
    }

    /// Whether a top-level file with this exact name exists
    pub fn has_file(&self, name: &str) -> bool {
        self.files.contains(name)
    }

    /// Whether a top-level directory with this exact name exists
    pub fn has_dir(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    /// Whether any top-level file matches the glob pattern
    pub fn has_file_matching(&self, pattern: &glob::Pattern) -> bool {
        self.files.iter().any(|f| pattern.matches(f))
    }

    /// Content of the package manifest, if one exists
    pub fn package_manifest(&self) -> Option<&str> {
        self.package_manifest.as_deref()
    }
}

/// How a rule decides whether it applies
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Manifest present: the first marker found in its content wins,
    /// otherwise the fallback type
    Manifest {
        markers: &'static [(&'static str, ProjectType)],
        fallback: ProjectType,
    },
    /// Any of the named files exists
    AnyFile(&'static [&'static str], ProjectType),
    /// Any file matches one of the glob patterns
    AnyGlob(&'static [&'static str], ProjectType),
    /// All named directories exist
    AllDirs(&'static [&'static str], ProjectType),
}

/// A single entry of the detection table
#[derive(Debug, Clone, Copy)]
pub struct DetectionRule {
    pub name: &'static str,
    pub matcher: Matcher,
}

impl DetectionRule {
    /// Evaluate the rule against a snapshot
    ///
    /// Fails only when a glob pattern in the rule does not compile.
    pub fn evaluate(&self, evidence: &DetectionEvidence) -> Result<Option<ProjectType>> {
        let matched = match self.matcher {
            Matcher::Manifest { markers, fallback } => {
                evidence.package_manifest().map(|content| {
                    markers
                        .iter()
                        .find(|(marker, _)| content.contains(marker))
                        .map(|(_, t)| *t)
                        .unwrap_or(fallback)
                })
            }
            Matcher::AnyFile(names, t) => names.iter().any(|n| evidence.has_file(n)).then_some(t),
            Matcher::AnyGlob(patterns, t) => {
                let mut found = false;
                for pattern in patterns {
                    if evidence.has_file_matching(&glob::Pattern::new(pattern)?) {
                        found = true;
                        break;
                    }
                }
                found.then_some(t)
            }
            Matcher::AllDirs(names, t) => names.iter().all(|n| evidence.has_dir(n)).then_some(t),
        };
        Ok(matched)
    }
}

/// Detection rules in priority order
pub const DETECTION_RULES: &[DetectionRule] = &[
    DetectionRule {
        name: "package manifest",
        matcher: Matcher::Manifest {
            markers: &[
                ("\"react\"", ProjectType::React),
                ("\"vue\"", ProjectType::Vue),
                ("\"@angular/core\"", ProjectType::Angular),
            ],
            fallback: ProjectType::Node,
        },
    },
    DetectionRule {
        name: "python",
        matcher: Matcher::AnyFile(
            &["requirements.txt", "setup.py", "pyproject.toml", "Pipfile"],
            ProjectType::Python,
        ),
    },
    DetectionRule {
        name: "java build tool",
        matcher: Matcher::AnyFile(
            &["pom.xml", "build.gradle", "build.gradle.kts"],
            ProjectType::Java,
        ),
    },
    DetectionRule {
        name: ".NET project",
        matcher: Matcher::AnyGlob(&["*.csproj", "*.sln"], ProjectType::Csharp),
    },
    DetectionRule {
        name: "go module",
        matcher: Matcher::AnyFile(&["go.mod"], ProjectType::Go),
    },
    DetectionRule {
        name: "cargo manifest",
        matcher: Matcher::AnyFile(&["Cargo.toml"], ProjectType::Rust),
    },
    DetectionRule {
        name: "composer manifest",
        matcher: Matcher::AnyFile(&["composer.json"], ProjectType::Php),
    },
    DetectionRule {
        name: "gemfile",
        matcher: Matcher::AnyFile(&["Gemfile"], ProjectType::Ruby),
    },
    DetectionRule {
        name: "pubspec",
        matcher: Matcher::AnyFile(&["pubspec.yaml"], ProjectType::Flutter),
    },
    DetectionRule {
        name: "unity project",
        matcher: Matcher::AllDirs(&["Assets", "ProjectSettings"], ProjectType::Unity),
    },
];

/// Ordered candidate list; the first entry is the recommended type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList(Vec<ProjectType>);

impl CandidateList {
    /// Recommended (first) candidate
    pub fn primary(&self) -> Option<ProjectType> {
        self.0.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[ProjectType] {
        &self.0
    }

    pub fn contains(&self, project_type: ProjectType) -> bool {
        self.0.contains(&project_type)
    }
}

/// Project type detector over a fixed rule table
#[derive(Debug)]
pub struct ProjectDetector {
    rules: &'static [DetectionRule],
}

impl Default for ProjectDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectDetector {
    /// Create a detector using the built-in rule table
    pub fn new() -> Self {
        Self {
            rules: DETECTION_RULES,
        }
    }

    /// Evaluate every rule in order against the snapshot
    pub fn detect(&self, evidence: &DetectionEvidence) -> Result<CandidateList> {
        let mut candidates = Vec::new();

        for rule in self.rules {
            if let Some(t) = rule.evaluate(evidence)? {
                debug!("Detection rule '{}' matched: {}", rule.name, t);
                if !candidates.contains(&t) {
                    candidates.push(t);
                }
            }
        }

        Ok(CandidateList(candidates))
    }

    /// Snapshot `dir` and detect in one call
    pub async fn detect_dir(&self, dir: &Utf8Path) -> Result<CandidateList> {
        let evidence = DetectionEvidence::gather(dir).await?;
        self.detect(&evidence)
    }
}
