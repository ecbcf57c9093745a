use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// First-parent history from the current head back to the root commit
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head_oid = self.head_oid()?;

        for commit in RevList::new(self, Some(head_oid)) {
            self.display_commit(&commit?)?;
        }

        Ok(())
    }

    /// Every commit in the object database, in no particular order
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for commit in self.all_commits()? {
            self.display_commit(&commit)?;
        }

        Ok(())
    }

    pub(crate) fn all_commits(&self) -> anyhow::Result<Vec<Commit>> {
        let mut commits = Vec::new();

        for oid in self.database().list_objects()? {
            if let Some(commit) = self.database().parse_object_as_commit(&oid)? {
                commits.push(commit);
            }
        }

        Ok(commits)
    }

    fn display_commit(&self, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", commit.oid())?;
        if commit.is_merge() {
            let parents = commit
                .parents()
                .iter()
                .map(ObjectId::to_short_oid)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(writer, "Merge: {}", parents)?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
