//! # gitseed-core
//!
//! Core library for the gitseed CLI providing:
//! - Runtime configuration types (git workflow, gitignore defaults, secret store, tutorial)
//! - Layered configuration loading (embedded defaults, user file, environment)
//! - Shared helpers such as home directory resolution

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use types::RuntimeConfig;
pub use utils::get_home_dir;
