//! Branch references
//!
//! References are human-readable names pointing to commits:
//!
//! - `HEAD`: the plain name of the current branch (never a commit id)
//! - `refs/heads/<branch>`: local branch tips
//! - `refs/remotes/<remote>/<branch>`: remote-tracking branch tips
//!
//! Every branch file holds a single 40-character commit id.

use crate::artifacts::branch::branch_name::{BranchName, RefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Reference store rooted at the metadata directory
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.gitlet`)
    path: Box<Path>,
}

impl Refs {
    /// Name of the checked-out branch
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        BranchName::try_parse(content.trim().to_string())
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    /// Point HEAD at another branch
    pub fn set_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        tracing::debug!(branch = %branch_name, "moving HEAD");
        self.update_ref_file(&self.head_path(), branch_name.as_ref())
    }

    /// Commit at the tip of the current branch
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_ref(&RefName::Local(self.current_branch()?))
    }

    /// Advance the current branch
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref(&RefName::Local(self.current_branch()?), oid)
    }

    pub fn ref_exists(&self, ref_name: &RefName) -> bool {
        self.ref_path(ref_name).is_file()
    }

    pub fn read_ref(&self, ref_name: &RefName) -> anyhow::Result<Option<ObjectId>> {
        let ref_path = self.ref_path(ref_name);

        if !ref_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&ref_path)
            .with_context(|| format!("failed to read ref file at {:?}", ref_path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content.to_string())?))
    }

    pub fn update_ref(&self, ref_name: &RefName, oid: &ObjectId) -> anyhow::Result<()> {
        tracing::debug!(reference = %ref_name, oid = %oid, "updating ref");
        self.update_ref_file(&self.ref_path(ref_name), oid.as_ref())
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        let ref_name = RefName::Local(name.clone());

        if self.ref_exists(&ref_name) {
            return Err(RepositoryError::BranchExists.into());
        }

        self.update_ref(&ref_name, source_oid)
    }

    /// Remove a local branch pointer; its commits stay in the store
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let ref_name = RefName::Local(name.clone());
        let oid = self.read_ref(&ref_name)?.ok_or(RepositoryError::NoSuchBranch)?;

        let branch_path = self.ref_path(&ref_name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;

        Ok(oid)
    }

    /// Local branches in name order
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let mut branches = WalkDir::new(self.heads_path())
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                BranchName::try_parse(entry.file_name().to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn ref_path(&self, ref_name: &RefName) -> PathBuf {
        self.path.join(ref_name.as_ref_path())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn remotes_path(&self) -> Box<Path> {
        self.refs_path().join("remotes").into_boxed_path()
    }
}
