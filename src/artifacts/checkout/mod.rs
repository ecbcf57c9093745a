//! Checkout operations and untracked-file safety
//!
//! Switching the working directory to another commit is planned in full and
//! checked against untracked files before any file is changed.

pub mod conflict;
pub mod migration;
