use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Record the staged changes on top of the current head
    ///
    /// The new mapping starts from a copy of the head commit's mapping, then
    /// applies the staged additions and removals. Staged snapshots are promoted
    /// before the commit is stored, the commit is stored before the branch
    /// moves, and the index is cleared last.
    pub(crate) fn write_commit(
        &self,
        index: &mut Index,
        parents: Vec<ObjectId>,
        message: &str,
    ) -> anyhow::Result<Commit> {
        let mut files = self.head_commit()?.files().clone();

        for (name, oid) in index.added() {
            self.database().promote_staged(oid)?;
            files.insert(name.clone(), oid.clone());
        }
        for name in index.removed() {
            files.remove(name);
        }

        let commit = Commit::new(
            message.to_string(),
            Commit::timestamp_from_env(),
            parents,
            files,
        );

        self.database().store(&commit)?;
        self.refs().update_head(commit.oid())?;

        index.clear();
        index.write_updates()?;

        tracing::info!(oid = %commit.oid(), files = commit.files().len(), "commit written");

        Ok(commit)
    }
}
