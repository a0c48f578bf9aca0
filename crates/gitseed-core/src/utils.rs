//! Shared utility functions for gitseed crates

use anyhow::anyhow;
use std::path::PathBuf;

/// Get the user's home directory
///
/// `~/.gitseed/config.yaml` is resolved against this. HOME wins over
/// `dirs::home_dir()` (which reads the passwd entry) so that running under
/// `HOME=/some/dir gitseed` picks up that directory's config, the same way
/// the `git` child processes resolve `~/.gitconfig`.
pub fn get_home_dir() -> anyhow::Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_get_home_dir_prefers_env() {
        let temp_dir = TempDir::new().unwrap();
        let original = std::env::var("HOME").ok();

        std::env::set_var("HOME", temp_dir.path());
        let home = get_home_dir();
        match original {
            Some(value) => std::env::set_var("HOME", value),
            None => std::env::remove_var("HOME"),
        }

        assert_eq!(home.unwrap(), temp_dir.path());
    }
}
