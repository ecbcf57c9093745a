//! Working tree status inspection
//!
//! Compares the working directory against the staging index and the HEAD
//! commit.
//!
//! - `file_change`: categories of changes and how they are rendered
//! - `inspector`: per-file change detection
//! - `status_info`: status aggregation for the `status` command

pub mod file_change;
pub mod inspector;
pub mod status_info;
