//! Object types and operations
//!
//! Every stored record is identified by a SHA-1 hash of its fields. There are two kinds:
//!
//! - **Blob**: one file's name and content at capture time
//! - **Commit**: message, timestamp, parent links and the complete file mapping
//!
//! All objects implement serialization/deserialization for the on-disk format:
//! `<type> <size>\0<content>`

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
