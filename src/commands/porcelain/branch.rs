use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, RefName};
use crate::errors::RepositoryError;

impl Repository {
    /// Create a branch pointing at the current head commit
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.head_oid()?;

        self.refs().create_branch(&branch_name, &head_oid)?;

        Ok(())
    }

    /// Delete a branch pointer; commits stay in the object database
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound)?;

        if !self.refs().ref_exists(&RefName::Local(branch_name.clone())) {
            return Err(RepositoryError::BranchNotFound.into());
        }

        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::RemoveCurrentBranch.into());
        }

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
