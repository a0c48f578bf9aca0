//! Project type detection and gitignore templates.
//!
//! The template system is organized into focused modules:
//! - `parser`: YAML structure parsing into strongly-typed Rust
//! - `catalog`: the embedded per-type pattern catalog and its lookups
//! - `detector`: rule-table detection over a directory snapshot
//!
//! # Example Usage
//!
//! ```no_run
//! use gitseed_projects::templates::{DetectionEvidence, ProjectDetector, TemplateCatalog};
//! use camino::Utf8Path;
//!
//! # async fn example() -> gitseed_projects::Result<()> {
//! let catalog = TemplateCatalog::from_embedded()?;
//! let evidence = DetectionEvidence::gather(Utf8Path::new(".")).await?;
//! let candidates = ProjectDetector::new().detect(&evidence)?;
//!
//! match candidates.primary() {
//!     Some(recommended) => {
//!         println!("Recommended type: {}", recommended);
//!         let patterns = catalog.patterns(recommended);
//!         println!("{} template entries", patterns.len());
//!     }
//!     None => println!("No project markers found, pick a type manually"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod detector;
pub mod parser;

pub use catalog::TemplateCatalog;
pub use detector::{
    CandidateList, DetectionEvidence, DetectionRule, Matcher, ProjectDetector, DETECTION_RULES,
};
pub use parser::{GitignoreTemplate, TemplateConfig};
