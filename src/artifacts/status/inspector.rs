use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::FileMapping;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;

/// Compares working files against HEAD and the staging index
#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// Absent from HEAD's mapping and not staged for addition
    pub fn is_untracked(&self, name: &str, head: &FileMapping, index: &Index) -> bool {
        !head.contains_key(name) && index.staged_oid(name).is_none()
    }

    /// Working file present but invisible to the next commit
    ///
    /// Also covers files staged for removal and then re-created.
    pub fn is_listed_untracked(&self, name: &str, head: &FileMapping, index: &Index) -> bool {
        self.is_untracked(name, head, index) || index.is_removed(name)
    }

    /// Unstaged change of a file the next commit would record
    pub fn check_workspace(
        &self,
        name: &str,
        head: &FileMapping,
        index: &Index,
    ) -> anyhow::Result<Option<WorkspaceChangeType>> {
        let expected = match (index.staged_oid(name), head.get(name)) {
            (Some(staged), _) => staged,
            (None, Some(_)) if index.is_removed(name) => return Ok(None),
            (None, Some(committed)) => committed,
            (None, None) => return Ok(None),
        };

        let blob = self.repository.workspace().parse_blob(name)?;

        if blob.is_tombstone() {
            Ok(Some(WorkspaceChangeType::Deleted))
        } else if blob.object_id() != expected {
            Ok(Some(WorkspaceChangeType::Modified))
        } else {
            Ok(None)
        }
    }
}
