use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// First-parent history, newest first
#[derive(Clone, new)]
pub struct RevList<'r> {
    repository: &'r Repository,
    start_oid: Option<ObjectId>,
}

impl<'r> IntoIterator for RevList<'r> {
    type Item = anyhow::Result<Commit>;
    type IntoIter = RevListIntoIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIntoIter {
            repository: self.repository,
            current_commit_oid: self.start_oid,
        }
    }
}

#[derive(Clone)]
pub struct RevListIntoIter<'r> {
    repository: &'r Repository,
    current_commit_oid: Option<ObjectId>,
}

impl Iterator for RevListIntoIter<'_> {
    type Item = anyhow::Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.repository.load_commit(&commit_oid) {
            Ok(commit) => {
                // merges are followed through their first parent only
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok(commit))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
