use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::RepositoryError;

impl Repository {
    /// Stage the current content of a working file
    ///
    /// Adding a file whose content matches the head commit cancels any pending
    /// change for it; adding unchanged staged content does nothing.
    pub async fn add(&mut self, file_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let blob = self.workspace().parse_blob(file_name)?;
        if blob.is_tombstone() {
            return Err(RepositoryError::FileNotFound.into());
        }

        let head = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let oid = blob.object_id();
        if head.blob_for(file_name) == Some(oid) {
            if let Some(staged_oid) = index.unstage(file_name) {
                self.database().discard_staged(&staged_oid);
            }
            tracing::debug!(file = file_name, "content matches head, unstaged");
        } else if index.staged_oid(file_name) != Some(oid) {
            self.database().stage(&blob)?;
            if let Some(previous_oid) = index.stage_add(file_name, oid.clone())
                && &previous_oid != oid
            {
                self.database().discard_staged(&previous_oid);
            }
            tracing::debug!(file = file_name, %oid, "staged for addition");
        } else {
            return Ok(());
        }

        index.write_updates()?;

        Ok(())
    }
}
