use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::RepositoryError;
use std::io::Write;

impl Repository {
    /// Print the snapshot id of a working file, storing the snapshot if asked
    pub fn hash_object(&mut self, file_name: &str, write: bool) -> anyhow::Result<()> {
        let blob = self.workspace().parse_blob(file_name)?;
        if blob.is_tombstone() {
            return Err(RepositoryError::FileNotFound.into());
        }

        writeln!(self.writer(), "{}", blob.object_id())?;

        if !write {
            return Ok(());
        }

        self.ensure_initialized()?;
        self.database().store(&blob)?;

        Ok(())
    }
}
