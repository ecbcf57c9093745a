use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::FileMapping;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::inspector::Inspector;
use crate::errors::RepositoryError;

/// Refuses state changes that would clobber untracked work
///
/// An untracked working file obstructs a change when the change's target
/// content names the same file with a different snapshot.
pub struct UntrackedGuard<'r> {
    repository: &'r Repository,
    inspector: Inspector<'r>,
}

impl<'r> UntrackedGuard<'r> {
    pub fn new(repository: &'r Repository) -> Self {
        Self {
            repository,
            inspector: Inspector::new(repository),
        }
    }

    /// Names of the obstructing files, in name order
    pub fn obstructions<'t>(
        &self,
        head: &FileMapping,
        index: &Index,
        targets: impl IntoIterator<Item = (&'t String, Option<&'t ObjectId>)>,
    ) -> anyhow::Result<Vec<String>> {
        let mut obstructions = Vec::new();

        for (name, target_oid) in targets {
            if !self.inspector.is_untracked(name, head, index) {
                continue;
            }

            let blob = self.repository.workspace().parse_blob(name)?;
            if !blob.is_tombstone() && Some(blob.object_id()) != target_oid {
                obstructions.push(name.clone());
            }
        }

        obstructions.sort();
        Ok(obstructions)
    }

    /// Fail with `UntrackedObstruction` if any target file is obstructed
    pub fn check<'t>(
        &self,
        head: &FileMapping,
        index: &Index,
        targets: impl IntoIterator<Item = (&'t String, Option<&'t ObjectId>)>,
    ) -> anyhow::Result<()> {
        let obstructions = self.obstructions(head, index, targets)?;

        if obstructions.is_empty() {
            Ok(())
        } else {
            tracing::debug!(files = ?obstructions, "untracked files in the way");
            Err(RepositoryError::UntrackedObstruction.into())
        }
    }
}
