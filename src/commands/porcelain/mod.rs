//! Porcelain commands
//!
//! - `init`: create the metadata directory and the root commit
//! - `add` / `rm`: stage additions and removals
//! - `commit`: record the staged changes
//! - `log` / `global-log` / `find`: inspect history
//! - `status`: report branches, staged changes and working directory state
//! - `branch` / `rm-branch`: manage branch pointers
//! - `checkout` / `reset`: move the working directory to another commit
//! - `merge`: three-way merge of another branch into the current one
//! - `add-remote` / `rm-remote` / `push` / `fetch` / `pull`: exchange history
//!   with another repository on the local file system

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod remote;
pub mod reset;
pub mod rm;
pub mod status;
