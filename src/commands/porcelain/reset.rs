use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Move the current branch to any commit and check it out
    pub async fn reset(&mut self, revision: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_oid = self.resolve_commit(revision)?;
        let head = self.head_commit()?;
        let target = self.load_commit(&target_oid)?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        Migration::new(self, head.files(), target.files()).apply_changes(&mut index)?;
        self.refs().update_head(&target_oid)?;

        tracing::info!(oid = %target_oid, "reset current branch");

        Ok(())
    }
}
