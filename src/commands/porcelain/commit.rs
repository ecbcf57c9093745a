use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use std::io::Write;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if message.trim().is_empty() {
            return Err(RepositoryError::EmptyMessage.into());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if index.is_empty() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let head_oid = self.head_oid()?;
        let commit = self.write_commit(&mut index, vec![head_oid], message)?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            self.refs().current_branch()?,
            commit.oid().to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
