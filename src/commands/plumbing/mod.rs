//! Plumbing commands
//!
//! - `hash-object`: compute a snapshot id and optionally store the snapshot
//! - `cat-file`: print a stored record

pub mod cat_file;
pub mod hash_object;
mod write_commit;
