//! gitlet: a small local version control system
//!
//! Tracks the top-level files of a working directory through immutable,
//! content-addressed snapshots and commits:
//!
//! - `areas`: the stateful parts of a repository (object database, staging
//!   index, references, remote registry, working directory)
//! - `artifacts`: records and algorithms (objects, commit graph, merge,
//!   checkout planning, status inspection)
//! - `commands`: the command implementations, as `impl Repository` blocks
//! - `errors`: the user-facing failure taxonomy

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
