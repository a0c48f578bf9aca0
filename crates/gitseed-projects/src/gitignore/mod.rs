//! .gitignore entry validation and composition

mod composer;
mod validator;

pub use composer::{
    append_entries, compose_gitignore, plan_entries, tokenize, ComposeChoice, ComposeReport,
    GitignoreProposal, GITIGNORE_FILE,
};
pub use validator::{is_valid_entry, validate_entry, EntryRejection};
