use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    /// Unstage a file, or stage the removal of a tracked file
    ///
    /// A staged file is only unstaged. Otherwise the working copy of a tracked
    /// file is deleted only when it still holds the content of the head
    /// commit, so unsaved edits are never lost.
    pub async fn rm(&mut self, file_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if let Some(staged_oid) = index.unstage(file_name) {
            self.database().discard_staged(&staged_oid);
            tracing::debug!(file = file_name, "unstaged");
        } else if let Some(head_oid) = head.blob_for(file_name) {
            self.remove_tracked(&mut index, file_name, head_oid)?;
        } else {
            return Err(RepositoryError::NothingToRemove.into());
        }

        index.write_updates()?;

        Ok(())
    }

    /// Stage the removal of a file tracked as `head_oid`
    ///
    /// The working copy goes away only if it is unmodified.
    pub(crate) fn remove_tracked(
        &self,
        index: &mut Index,
        file_name: &str,
        head_oid: &ObjectId,
    ) -> anyhow::Result<()> {
        index.stage_remove(file_name);

        let blob = self.workspace().parse_blob(file_name)?;
        if blob.object_id() == head_oid {
            self.workspace().remove_file(file_name)?;
        }
        tracing::debug!(file = file_name, "staged for removal");

        Ok(())
    }
}
