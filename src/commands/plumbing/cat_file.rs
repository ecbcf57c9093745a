use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use std::io::Write;

impl Repository {
    /// Print a stored record addressed by a full or abbreviated id
    pub fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let object_id = self.resolve_object(object_id)?;
        let content = match self.database().parse_object(&object_id)? {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Commit(commit) => commit.display(),
        };

        write!(self.writer(), "{}", content)?;

        Ok(())
    }
}
