//! Remote URL classification and host extraction

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static HTTPS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://([^/]+)/.+\.git$").expect("https url regex is valid")
});
static SCP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^git@([^:/]+):.+\.git$").expect("scp url regex is valid")
});
static SSH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ssh://git@([^/]+)/.+\.git$").expect("ssh url regex is valid")
});

/// Supported remote URL shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlForm {
    /// `http(s)://host/path.git`
    Https,
    /// `git@host:path.git`
    ScpShorthand,
    /// `ssh://git@host/path.git`
    Ssh,
}

impl UrlForm {
    /// Whether pushing over this form authenticates with username/token
    pub fn uses_token_auth(&self) -> bool {
        matches!(self, Self::Https)
    }
}

impl fmt::Display for UrlForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Https => write!(f, "https"),
            Self::ScpShorthand => write!(f, "ssh (scp-like)"),
            Self::Ssh => write!(f, "ssh"),
        }
    }
}

/// A validated remote URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitUrl {
    raw: String,
    form: UrlForm,
    host: String,
}

impl GitUrl {
    /// Classify a URL, returning `None` for unsupported shapes
    pub fn classify(url: &str) -> Option<Self> {
        let candidates: [(&Regex, UrlForm); 3] = [
            (&HTTPS_RE, UrlForm::Https),
            (&SCP_RE, UrlForm::ScpShorthand),
            (&SSH_RE, UrlForm::Ssh),
        ];

        candidates.into_iter().find_map(|(re, form)| {
            re.captures(url).map(|caps| Self {
                raw: url.to_string(),
                form,
                host: caps[1].to_string(),
            })
        })
    }

    /// Classify a URL, failing with [`Error::InvalidRepoUrl`]
    pub fn parse(url: &str) -> Result<Self> {
        Self::classify(url.trim()).ok_or_else(|| Error::invalid_repo_url(url))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn form(&self) -> UrlForm {
        self.form
    }

    /// Host used to scope credential lookup
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Display for GitUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
