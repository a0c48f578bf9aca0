//! Gitignore entry validation

use std::fmt;

/// Characters that are never allowed in an entry
const RESERVED_CHARS: [char; 3] = ['<', '>', '|'];

/// Why an entry was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRejection {
    /// Empty string
    Empty,
    /// Contains `<`, `>` or `|`
    ReservedCharacter(char),
    /// Contains a `/` but does not end with one
    PartialPath,
}

impl fmt::Display for EntryRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "entry is empty"),
            Self::ReservedCharacter(c) => write!(f, "entry contains reserved character '{}'", c),
            Self::PartialPath => write!(
                f,
                "entries containing '/' must end with '/' (directory patterns only)"
            ),
        }
    }
}

/// Check an entry, returning the reason it is rejected
pub fn validate_entry(entry: &str) -> Result<(), EntryRejection> {
    if entry.is_empty() {
        return Err(EntryRejection::Empty);
    }

    if let Some(c) = entry.chars().find(|c| RESERVED_CHARS.contains(c)) {
        return Err(EntryRejection::ReservedCharacter(c));
    }

    if entry.contains('/') && !entry.ends_with('/') {
        return Err(EntryRejection::PartialPath);
    }

    Ok(())
}

/// Whether an entry may be written to .gitignore
pub fn is_valid_entry(entry: &str) -> bool {
    validate_entry(entry).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_patterns() {
        for entry in ["dist/", "*.log", "node_modules/", ".env", "[Ll]ibrary/", "/build/"] {
            assert!(is_valid_entry(entry), "{} should be accepted", entry);
        }
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_entry(""), Err(EntryRejection::Empty));
    }

    #[test]
    fn test_rejects_reserved_characters() {
        assert_eq!(
            validate_entry("foo>bar"),
            Err(EntryRejection::ReservedCharacter('>'))
        );
        assert_eq!(
            validate_entry("<script"),
            Err(EntryRejection::ReservedCharacter('<'))
        );
        assert_eq!(
            validate_entry("a|b"),
            Err(EntryRejection::ReservedCharacter('|'))
        );
        // reserved characters win over the path rule
        assert_eq!(
            validate_entry("a/b|"),
            Err(EntryRejection::ReservedCharacter('|'))
        );
    }

    #[test]
    fn test_rejects_partial_paths() {
        assert_eq!(validate_entry("a/b"), Err(EntryRejection::PartialPath));
        assert_eq!(validate_entry("**/*.log"), Err(EntryRejection::PartialPath));
        assert_eq!(validate_entry("/secret.txt"), Err(EntryRejection::PartialPath));
        assert!(is_valid_entry("a/b/"));
    }
}
