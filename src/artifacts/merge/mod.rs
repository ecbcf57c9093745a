//! Three-way merge support
//!
//! - `resolution`: per-file classification against the split point
//! - `conflict_marker`: rendering of conflicting versions

pub mod conflict_marker;
pub mod resolution;
