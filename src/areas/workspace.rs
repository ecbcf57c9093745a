//! Working directory
//!
//! Only regular files directly inside the working directory are candidates
//! for tracking. Subdirectories (and the `.gitlet` metadata directory among
//! them) are never listed, read or touched.

use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the plain files in the working directory, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// File content, `None` when the file is absent
    pub fn read_file(&self, name: &str) -> anyhow::Result<Option<Bytes>> {
        let file_path = self.path.join(name);

        if !file_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {:?}", name))?;

        Ok(Some(Bytes::from(content)))
    }

    /// Snapshot of the file as it is now (a tombstone when absent)
    pub fn parse_blob(&self, name: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(name, self.read_file(name)?))
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let path = self.path.join(name);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Failed to open file: {:?}", name))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", name))
    }

    /// Delete a working file; an absent file is not an error
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let path = self.path.join(name);

        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {:?}", name))?;
        }

        Ok(())
    }

    // deletions are applied before writes
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        self.apply_migration_action_set(migration, ActionType::Delete)?;
        self.apply_migration_action_set(migration, ActionType::Write)?;

        Ok(())
    }

    fn apply_migration_action_set(
        &self,
        migration: &Migration,
        action: ActionType,
    ) -> anyhow::Result<()> {
        let Some(entries) = migration.actions().get(&action) else {
            return Ok(());
        };

        for (name, oid) in entries {
            match (&action, oid) {
                (ActionType::Delete, _) => self.remove_file(name)?,
                (ActionType::Write, Some(oid)) => match migration.load_blob_data(oid)? {
                    Some(content) => self.write_file(name, &content)?,
                    None => self.remove_file(name)?,
                },
                (ActionType::Write, None) => {
                    anyhow::bail!("Snapshot must be provided to write {:?}", name)
                }
            }
        }

        Ok(())
    }
}
