//! Workflow commands
//!
//! gitseed has a single workflow: bootstrap the target directory as a new
//! repository. `init` drives it end to end and hands the optional remote
//! setup to the stage sequence in `remote`.

pub mod init;
pub mod remote;
