//! Data structures and algorithms behind the commands
//!
//! - `branch`: Branch and remote-tracking reference names
//! - `checkout`: Working directory replacement and untracked-file safety
//! - `core`: Shared utilities (pager wrapper)
//! - `index`: On-disk layout of the staging index
//! - `log`: Commit graph navigation
//! - `merge`: Three-way classification and conflict rendering
//! - `objects`: Snapshot and commit records
//! - `status`: Working directory inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
