//! Core repository components
//!
//! - `database`: Object store for snapshots and commits, plus the staging shelf
//! - `index`: Staging area tracking pending additions and removals
//! - `refs`: Branch pointers and HEAD
//! - `remotes`: Registry of other repositories reachable on the filesystem
//! - `repository`: High-level repository handle tying the areas together
//! - `workspace`: Working directory file operations

pub mod database;
pub mod index;
pub mod refs;
pub mod remotes;
pub mod repository;
pub mod workspace;
