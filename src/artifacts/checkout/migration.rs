//! Working directory replacement
//!
//! Moving the working directory to another commit (branch checkout, reset,
//! fast-forward merge) is planned before anything is touched:
//!
//! 1. Check that no untracked file is in the way of the target content
//! 2. Plan deletions of every working file the target does not map
//! 3. Plan a write for every file the target maps
//! 4. Apply the plan and clear the staging index

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::checkout::conflict::UntrackedGuard;
use crate::artifacts::objects::commit::FileMapping;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::HashMap;

/// Type of file system action required for checkout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Delete a working file
    Delete,
    /// Write a snapshot into a working file
    Write,
}

/// Set of planned actions grouped by type
pub type ActionsSet = HashMap<ActionType, Vec<(String, Option<ObjectId>)>>;

pub struct Migration<'r> {
    repository: &'r Repository,
    /// File mapping of the commit the working directory currently reflects
    head: &'r FileMapping,
    /// File mapping to move to
    target: &'r FileMapping,
    actions: ActionsSet,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, head: &'r FileMapping, target: &'r FileMapping) -> Self {
        let actions = HashMap::from([(ActionType::Delete, Vec::new()), (ActionType::Write, Vec::new())]);

        Self {
            repository,
            head,
            target,
            actions,
        }
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }

    /// Plan and apply the move; the index is cleared afterwards
    pub fn apply_changes(&mut self, index: &mut Index) -> anyhow::Result<()> {
        self.plan_changes(index)?;
        self.repository.workspace().apply_migration(self)?;

        index.clear();
        index.write_updates()?;

        Ok(())
    }

    fn plan_changes(&mut self, index: &Index) -> anyhow::Result<()> {
        UntrackedGuard::new(self.repository).check(
            self.head,
            index,
            self.target.iter().map(|(name, oid)| (name, Some(oid))),
        )?;

        for name in self.repository.workspace().list_files()? {
            if !self.target.contains_key(&name) {
                self.actions
                    .entry(ActionType::Delete)
                    .or_default()
                    .push((name, None));
            }
        }

        for (name, oid) in self.target {
            self.actions
                .entry(ActionType::Write)
                .or_default()
                .push((name.clone(), Some(oid.clone())));
        }

        tracing::debug!(
            deletions = self.actions[&ActionType::Delete].len(),
            writes = self.actions[&ActionType::Write].len(),
            "planned working directory migration"
        );

        Ok(())
    }

    /// Content of a snapshot, `None` for a tombstone
    pub fn load_blob_data(&self, object_id: &ObjectId) -> anyhow::Result<Option<Bytes>> {
        let blob = self
            .repository
            .database()
            .parse_object_as_blob(object_id)?
            .with_context(|| format!("Failed to parse blob object {}", object_id))?;

        Ok(blob.content().cloned())
    }
}
