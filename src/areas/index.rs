//! Staging index
//!
//! Records the pending changes for the next commit: snapshots staged for
//! addition (keyed by file name) and file names staged for removal. A name is
//! never in both sets at once.
//!
//! ## Index File Format
//!
//! The index file contains:
//! - Header: Signature, version and both entry counts
//! - Entries: Added entries sorted by name, then removed names sorted
//! - Checksum: SHA-1 hash of the entire index for integrity verification

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitlet/index`)
    path: Box<Path>,
    /// Snapshots staged for addition
    added: BTreeMap<String, ObjectId>,
    /// Names staged for removal
    removed: BTreeSet<String>,
    header: IndexHeader,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            added: BTreeMap::new(),
            removed: BTreeSet::new(),
            header: IndexHeader::empty(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop every pending change
    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.header = IndexHeader::empty();
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn added(&self) -> &BTreeMap<String, ObjectId> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn staged_oid(&self, name: &str) -> Option<&ObjectId> {
        self.added.get(name)
    }

    pub fn is_removed(&self, name: &str) -> bool {
        self.removed.contains(name)
    }

    /// Stage a snapshot for addition
    ///
    /// Returns the snapshot it replaced, if any.
    pub fn stage_add(&mut self, name: &str, oid: ObjectId) -> Option<ObjectId> {
        self.removed.remove(name);
        self.added.insert(name.to_string(), oid)
    }

    /// Stage a removal, unless the name is staged for addition
    pub fn stage_remove(&mut self, name: &str) -> bool {
        if self.added.contains_key(name) {
            return false;
        }

        self.removed.insert(name.to_string())
    }

    /// Forget every pending change for `name`
    ///
    /// Returns the snapshot that was staged for addition, if any.
    pub fn unstage(&mut self, name: &str) -> Option<ObjectId> {
        self.removed.remove(name);
        self.added.remove(name)
    }

    /// Load the index from disk
    ///
    /// A missing or empty file is an empty index. Acquires a shared lock on
    /// the index file during reading and verifies the trailing checksum.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock.deref_mut());
        let header = Self::parse_header(&mut reader)?;

        for _ in 0..header.added_count {
            let entry = IndexEntry::read_added(&mut reader)?;
            if let Some(oid) = entry.oid {
                self.added.insert(entry.name, oid);
            }
        }
        for _ in 0..header.removed_count {
            let entry = IndexEntry::read_removed(&mut reader)?;
            self.removed.insert(entry.name);
        }
        self.header = header;

        reader.verify()
    }

    fn parse_header(reader: &mut Checksum<impl Read>) -> anyhow::Result<IndexHeader> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header)
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock.deref_mut());

        self.header = IndexHeader {
            added_count: self.added.len() as u32,
            removed_count: self.removed.len() as u32,
            ..self.header.clone()
        };
        writer.write(&self.header.serialize()?)?;

        for (name, oid) in &self.added {
            writer.write(&IndexEntry::added(name.as_str(), oid.clone()).serialize()?)?;
        }
        for name in &self.removed {
            writer.write(&IndexEntry::removed(name.as_str()).serialize()?)?;
        }

        writer.finish()?;
        tracing::debug!(
            added = self.added.len(),
            removed = self.removed.len(),
            "index written"
        );

        Ok(())
    }
}
