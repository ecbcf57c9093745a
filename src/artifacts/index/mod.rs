//! Staging index file format
//!
//! The index records which snapshots are staged for addition and which file
//! names are staged for removal. It is rewritten after every mutation.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "STAG" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Added entry count (4 bytes)
//!   - Removed entry count (4 bytes)
//!
//! Added entries (variable length):
//!   - Snapshot ID, binary (20 bytes)
//!   - Name length (2 bytes)
//!   - Name (UTF-8)
//!
//! Removed entries (variable length):
//!   - Name length (2 bytes)
//!   - Name (UTF-8)
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 16; // 4 bytes for marker, 4 for version, 4 + 4 for entry counts

/// Magic signature identifying index files
pub const SIGNATURE: &str = "STAG";

/// Index file format version
pub const VERSION: u32 = 1;
