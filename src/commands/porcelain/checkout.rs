use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, RefName};
use crate::artifacts::checkout::migration::Migration;
use crate::errors::RepositoryError;
use anyhow::Context;

impl Repository {
    /// Switch to another branch, replacing the working directory with its head
    pub async fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::NoSuchBranch)?;
        let target_oid = self
            .refs()
            .read_ref(&RefName::Local(branch_name.clone()))?
            .ok_or(RepositoryError::NoSuchBranch)?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::AlreadyOnBranch.into());
        }

        let head = self.head_commit()?;
        let target = self.load_commit(&target_oid)?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        Migration::new(self, head.files(), target.files()).apply_changes(&mut index)?;
        self.refs().set_head(&branch_name)?;

        tracing::info!(branch = %branch_name, oid = %target_oid, "switched branch");

        Ok(())
    }

    /// Restore one working file from a commit (the head commit by default)
    ///
    /// The staging index is left untouched.
    pub fn checkout_file(&mut self, revision: Option<&str>, file_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit_oid = match revision {
            Some(revision) => self.resolve_commit(revision)?,
            None => self.head_oid()?,
        };
        let commit = self.load_commit(&commit_oid)?;

        let blob_oid = commit
            .blob_for(file_name)
            .ok_or(RepositoryError::FileNotInCommit)?;
        let blob = self
            .database()
            .parse_object_as_blob(blob_oid)?
            .with_context(|| format!("Failed to parse blob object {}", blob_oid))?;

        match blob.content() {
            Some(content) => self.workspace().write_file(file_name, content)?,
            None => self.workspace().remove_file(file_name)?,
        }

        Ok(())
    }
}
