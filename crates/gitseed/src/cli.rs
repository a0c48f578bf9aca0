//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::Parser;

/// gitseed - initialize a git repository with a tailored .gitignore
#[derive(Parser, Debug)]
#[command(name = "gitseed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to initialize
    #[arg(default_value = ".")]
    pub directory: Utf8PathBuf,

    /// Explain each git command before running it
    #[arg(short, long)]
    pub explain: bool,

    /// Write a git cheat sheet and print a workflow tutorial at the end
    #[arg(short, long)]
    pub tutorial: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Mode switches threaded through the workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub explain: bool,
    pub tutorial: bool,
}

impl Cli {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            explain: self.explain,
            tutorial: self.tutorial,
        }
    }
}
