use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use std::io::Write;

impl Repository {
    /// Print the ids of every commit whose message contains `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let matches = self
            .all_commits()?
            .into_iter()
            .filter(|commit| commit.message().contains(message))
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(RepositoryError::NoCommitWithMessage.into());
        }

        for commit in matches {
            writeln!(self.writer(), "{}", commit.oid())?;
        }

        Ok(())
    }
}
