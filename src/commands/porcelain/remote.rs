use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, RefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    pub fn add_remote(&mut self, remote_name: &str, remote_path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        self.remotes().add(remote_name, remote_path)
    }

    pub fn rm_remote(&mut self, remote_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        self.remotes().remove(remote_name)
    }

    /// Send the current head's history to a branch of the remote
    ///
    /// Refused when the remote branch holds commits the local history lacks.
    pub fn push(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let remote = self.open_remote(remote_name)?;
        let remote_ref = RefName::Local(BranchName::try_parse(branch_name.to_string())?);
        let head_oid = self.head_oid()?;

        if let Some(remote_tip) = remote.refs().read_ref(&remote_ref)?
            && !self.commit_graph().is_ancestor(&remote_tip, &head_oid)?
        {
            return Err(RepositoryError::DivergedHistory.into());
        }

        Self::transfer_history(self, &remote, &head_oid)?;
        remote.refs().update_ref(&remote_ref, &head_oid)?;

        tracing::info!(remote = remote_name, branch = branch_name, oid = %head_oid, "pushed");

        Ok(())
    }

    /// Copy a remote branch's history into `refs/remotes/<remote>/<branch>`
    pub fn fetch(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let remote = self.open_remote(remote_name)?;
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::NoSuchRemoteBranch)?;
        let remote_tip = remote
            .refs()
            .read_ref(&RefName::Local(branch_name.clone()))?
            .ok_or(RepositoryError::NoSuchRemoteBranch)?;

        Self::transfer_history(&remote, self, &remote_tip)?;

        let tracking_ref = RefName::remote_tracking(remote_name, branch_name);
        self.refs().update_ref(&tracking_ref, &remote_tip)?;

        tracing::info!(reference = %tracking_ref, oid = %remote_tip, "fetched");

        Ok(())
    }

    /// Fetch a remote branch, then merge its remote-tracking branch
    pub async fn pull(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        self.fetch(remote_name, branch_name)?;
        self.merge(&format!("{}/{}", remote_name, branch_name)).await
    }

    /// Open the repository a registered remote points at
    ///
    /// Relative remote paths are resolved against this repository's root.
    fn open_remote(&self, remote_name: &str) -> anyhow::Result<Repository> {
        let metadata_path = self.path().join(self.remotes().get(remote_name)?);

        if !metadata_path.is_dir() {
            return Err(RepositoryError::RemoteNotFound.into());
        }

        let root = metadata_path
            .parent()
            .ok_or(RepositoryError::RemoteNotFound)?;
        let remote = Repository::new(root, Box::new(std::io::sink()))?;

        if !remote.is_initialized() {
            return Err(RepositoryError::RemoteNotFound.into());
        }

        Ok(remote)
    }

    /// Copy every commit reachable from `tip`, and the snapshots they map,
    /// that `destination` does not have yet
    ///
    /// Snapshots are copied before the commit that maps them.
    fn transfer_history(
        source: &Repository,
        destination: &Repository,
        tip: &ObjectId,
    ) -> anyhow::Result<()> {
        let mut copied = 0;

        for oid in source.commit_graph().history(tip)? {
            if destination.database().contains(&oid) {
                continue;
            }

            let commit = source.load_commit(&oid)?;
            for blob_oid in commit.files().values() {
                destination
                    .database()
                    .copy_object_from(source.database(), blob_oid)?;
            }
            destination.database().copy_object_from(source.database(), &oid)?;
            copied += 1;
        }

        tracing::debug!(copied, tip = %tip, "transferred commits");

        Ok(())
    }
}
