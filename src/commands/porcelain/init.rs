use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create the metadata directory, the root commit and the default branch
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(RepositoryError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .gitlet/objects directory")?;

        fs::create_dir_all(self.database().staging_path())
            .context("Failed to create .gitlet/staging directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .gitlet/refs/heads directory")?;

        fs::create_dir_all(self.refs().remotes_path())
            .context("Failed to create .gitlet/refs/remotes directory")?;

        let root = Commit::root();
        self.database()
            .store(&root)
            .context("Failed to store the initial commit")?;

        let default_branch = BranchName::default_branch();
        self.refs()
            .create_branch(&default_branch, root.oid())
            .context("Failed to create the default branch")?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        let index = self.index();
        let mut index = index.lock().await;
        index.clear();
        index
            .write_updates()
            .context("Failed to create .gitlet/index file")?;

        tracing::info!(path = %self.path().display(), "initialized repository");

        Ok(())
    }
}
