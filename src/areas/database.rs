//! Object database
//!
//! Committed records live in `objects/<2 hex>/<38 hex>`, zlib-compressed and
//! written atomically. Snapshots that are only staged live on a separate
//! shelf (`staging/<oid>`) until a commit promotes them, so `objects/` only
//! ever grows.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    staging_path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>, staging_path: Box<Path>) -> Self {
        Database { path, staging_path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn staging_path(&self) -> &Path {
        &self.staging_path
    }

    fn committed_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    fn staged_path(&self, object_id: &ObjectId) -> PathBuf {
        self.staging_path.join(object_id.as_ref())
    }

    /// Whether the record is committed to `objects/`
    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.committed_path(object_id).exists()
    }

    /// Whether the record can be read, either committed or staged
    pub fn is_readable(&self, object_id: &ObjectId) -> bool {
        self.contains(object_id) || self.staged_path(object_id).exists()
    }

    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let committed_path = self.committed_path(object_id);

        if committed_path.exists() {
            self.read_object(committed_path)
        } else {
            self.read_object(self.staged_path(object_id))
        }
    }

    /// Write a record to `objects/` unless it is already there
    pub fn store(&self, object: &impl Object) -> anyhow::Result<()> {
        let object_path = self.path.join(object.object_path());

        if !object_path.exists() {
            tracing::debug!(oid = %object.object_id(), kind = %object.object_type(), "storing object");
            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(())
    }

    /// Put a snapshot on the staging shelf
    pub fn stage(&self, blob: &Blob) -> anyhow::Result<()> {
        let staged_path = self.staged_path(blob.object_id());

        if !self.contains(blob.object_id()) && !staged_path.exists() {
            tracing::debug!(oid = %blob.object_id(), name = blob.name(), "staging snapshot");
            self.write_object(staged_path, blob.serialize()?)?;
        }

        Ok(())
    }

    /// Move a staged snapshot into `objects/`
    pub fn promote_staged(&self, object_id: &ObjectId) -> anyhow::Result<()> {
        let staged_path = self.staged_path(object_id);
        let object_path = self.committed_path(object_id);

        if object_path.exists() {
            self.discard_staged(object_id);
            return Ok(());
        }

        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;

        std::fs::rename(&staged_path, &object_path).context(format!(
            "Unable to promote staged snapshot {}",
            object_id
        ))?;
        tracing::debug!(oid = %object_id, "promoted staged snapshot");

        Ok(())
    }

    /// Drop a staged snapshot that no index entry refers to anymore
    ///
    /// Best effort: failures are logged and otherwise ignored.
    pub fn discard_staged(&self, object_id: &ObjectId) {
        let staged_path = self.staged_path(object_id);

        if staged_path.exists()
            && let Err(err) = std::fs::remove_file(&staged_path)
        {
            tracing::warn!(oid = %object_id, error = %err, "unable to discard staged snapshot");
        }
    }

    /// Copy the raw encoding of a committed record from another database
    pub fn copy_object_from(&self, other: &Database, object_id: &ObjectId) -> anyhow::Result<()> {
        let object_path = self.committed_path(object_id);
        if object_path.exists() {
            return Ok(());
        }

        let source_path = other.committed_path(object_id);
        let raw_content = std::fs::read(&source_path).context(format!(
            "Unable to read object file {}",
            source_path.display()
        ))?;

        tracing::debug!(oid = %object_id, "copying object");
        self.write_raw_object(object_path, &raw_content)
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                object_reader,
            )?))),
        }
    }

    /// Load a snapshot, `None` when the hash is unknown or names another kind
    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        if !self.is_readable(object_id) {
            return Ok(None);
        }

        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Some(Blob::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    /// Load a commit, `None` when the hash is unknown or names another kind
    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        if !self.contains(object_id) {
            return Ok(None);
        }

        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_content = Self::compress(object_content)?;

        self.write_raw_object(object_path, &object_content)
    }

    fn write_raw_object(&self, object_path: PathBuf, raw_content: &[u8]) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(raw_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all committed objects whose OID starts with the given prefix.
    ///
    /// Used to resolve abbreviated commit ids. Several matches mean the
    /// prefix is ambiguous; none means it is unknown.
    ///
    /// # Performance
    ///
    /// - For prefixes of 2+ characters, only searches the specific directory
    /// - For prefixes of 0-1 characters, must search all directories (slower)
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        if prefix.len() >= 2 {
            let dir_name = &prefix[..2];
            let file_prefix = &prefix[2..];
            self.collect_matches(
                dir_name,
                |file_name| file_name.starts_with(file_prefix),
                &mut matches,
            )?;
        } else {
            for i in 0..=255 {
                let dir_name = format!("{:02x}", i);
                self.collect_matches(
                    &dir_name,
                    |file_name| format!("{dir_name}{file_name}").starts_with(&prefix),
                    &mut matches,
                )?;
            }
        }

        matches.sort();
        Ok(matches)
    }

    fn collect_matches(
        &self,
        dir_name: &str,
        accept: impl Fn(&str) -> bool,
        matches: &mut Vec<ObjectId>,
    ) -> anyhow::Result<()> {
        let dir_path = self.path.join(dir_name);

        if dir_path.is_dir() {
            for entry in std::fs::read_dir(&dir_path)? {
                let file_name = entry?.file_name();
                let file_name = file_name.to_string_lossy();

                if accept(&file_name) {
                    // temp files never parse as ids
                    if let Ok(oid) = ObjectId::try_parse(format!("{}{}", dir_name, file_name)) {
                        matches.push(oid);
                    }
                }
            }
        }

        Ok(())
    }

    /// Every committed object, in id order
    pub fn list_objects(&self) -> anyhow::Result<Vec<ObjectId>> {
        self.find_objects_by_prefix("")
    }
}
