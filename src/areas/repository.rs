use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::remotes::Remotes;
use crate::areas::workspace::Workspace;
use crate::artifacts::log::commit_graph::CommitGraph;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::{Status, StatusInfo};
use crate::errors::RepositoryError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the metadata directory inside the working directory
pub const METADATA_DIR: &str = ".gitlet";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    remotes: Remotes,
}

impl Repository {
    pub fn new(path: impl AsRef<Path>, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;
        let metadata_path = path.join(METADATA_DIR);

        let index = Index::new(metadata_path.join("index").into_boxed_path());
        let database = Database::new(
            metadata_path.join("objects").into_boxed_path(),
            metadata_path.join("staging").into_boxed_path(),
        );
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(metadata_path.clone().into_boxed_path());
        let remotes = Remotes::new(metadata_path.join("config").into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
            remotes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(METADATA_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.metadata_path().is_dir()
    }

    /// Fail with `NotInitialized` outside a repository
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(RepositoryError::NotInitialized.into())
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn remotes(&self) -> &Remotes {
        &self.remotes
    }

    /// Everything `status` reports, computed against a loaded index
    pub fn status_info(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        Status::new(self).initialize(index)
    }

    /// Load a commit that must exist
    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database
            .parse_object_as_commit(oid)?
            .ok_or_else(|| RepositoryError::NoSuchCommit.into())
    }

    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        self.refs
            .read_head()?
            .context("HEAD does not point at a commit")
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.load_commit(&self.head_oid()?)
    }

    /// Resolve a full or abbreviated commit id
    pub fn resolve_commit(&self, revision: &str) -> anyhow::Result<ObjectId> {
        self.resolve_prefix(revision, |oid| {
            matches!(self.database.parse_object_as_commit(oid), Ok(Some(_)))
        })
    }

    /// Resolve a full or abbreviated id of any stored record
    pub fn resolve_object(&self, revision: &str) -> anyhow::Result<ObjectId> {
        self.resolve_prefix(revision, |_| true)
    }

    fn resolve_prefix(
        &self,
        revision: &str,
        accept: impl Fn(&ObjectId) -> bool,
    ) -> anyhow::Result<ObjectId> {
        if revision.is_empty() || !revision.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RepositoryError::NoSuchCommit.into());
        }

        let mut candidates = self
            .database
            .find_objects_by_prefix(revision)?
            .into_iter()
            .filter(|oid| accept(oid))
            .collect::<Vec<_>>();

        match candidates.len() {
            0 => Err(RepositoryError::NoSuchCommit.into()),
            1 => Ok(candidates.remove(0)),
            _ => Err(RepositoryError::AmbiguousCommit(revision.to_string()).into()),
        }
    }

    /// Navigator over this repository's commits
    pub fn commit_graph(
        &self,
    ) -> CommitGraph<impl Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>> + '_> {
        CommitGraph::new(|oid: &ObjectId| Ok(self.load_commit(oid)?.parents().to_vec()))
    }
}
