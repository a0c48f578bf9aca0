//! Type definitions for gitseed configuration

mod runtime_config;

pub use runtime_config::*;
