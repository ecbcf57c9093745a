use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::checkout::conflict::UntrackedGuard;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::conflict_marker::render_conflict;
use crate::artifacts::merge::resolution::Resolution;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    /// Merge another branch (local or remote-tracking) into the current one
    ///
    /// Every precondition is checked before anything is modified. A merge
    /// with conflicts still commits; the conflicted files hold both versions
    /// between markers.
    pub async fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if !index.is_empty() {
            return Err(RepositoryError::UncommittedChanges.into());
        }

        let other_ref =
            RefName::try_parse(branch_name).map_err(|_| RepositoryError::BranchNotFound)?;
        let other_oid = self
            .refs()
            .read_ref(&other_ref)?
            .ok_or(RepositoryError::BranchNotFound)?;

        let current_branch = self.refs().current_branch()?;
        if other_ref == RefName::Local(current_branch.clone()) {
            return Err(RepositoryError::SelfMerge.into());
        }

        let head_oid = self.head_oid()?;
        let split_oid = self
            .commit_graph()
            .lowest_common_ancestor(&head_oid, &other_oid)?
            .unwrap_or_else(|| Commit::root().oid().clone());

        if split_oid == other_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        let head = self.load_commit(&head_oid)?;
        let other = self.load_commit(&other_oid)?;

        if split_oid == head_oid {
            Migration::new(self, head.files(), other.files()).apply_changes(&mut index)?;
            self.refs().update_head(&other_oid)?;

            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = self.load_commit(&split_oid)?;
        let resolutions = Self::resolve_files(&split, &head, &other);

        UntrackedGuard::new(self).check(
            head.files(),
            &index,
            resolutions
                .iter()
                .map(|(name, resolution)| (name, resolution.target())),
        )?;

        let mut conflicted = false;
        for (name, resolution) in &resolutions {
            conflicted |= self.apply_resolution(&mut index, &head, name, resolution)?;
        }

        let message = format!("Merged {} into {}.", other_ref, current_branch);
        self.write_commit(&mut index, vec![head_oid, other_oid], &message)?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// Resolution of every file the merge has to touch, in name order
    fn resolve_files(split: &Commit, head: &Commit, other: &Commit) -> Vec<(String, Resolution)> {
        let names = split
            .files()
            .keys()
            .chain(head.files().keys())
            .chain(other.files().keys())
            .collect::<BTreeSet<_>>();

        names
            .into_iter()
            .filter_map(|name| {
                let resolution = Resolution::resolve(
                    split.blob_for(name),
                    head.blob_for(name),
                    other.blob_for(name),
                );
                tracing::debug!(file = %name, ?resolution, "classified");

                (resolution != Resolution::Keep).then(|| (name.clone(), resolution))
            })
            .collect()
    }

    /// Apply one resolution; returns whether the file ended up in conflict
    fn apply_resolution(
        &self,
        index: &mut Index,
        head: &Commit,
        name: &str,
        resolution: &Resolution,
    ) -> anyhow::Result<bool> {
        match resolution {
            Resolution::Keep => Ok(false),
            Resolution::Remove => {
                if let Some(head_oid) = head.blob_for(name) {
                    self.remove_tracked(index, name, head_oid)?;
                }
                Ok(false)
            }
            Resolution::TakeTheirs(theirs) => {
                match self.blob_content(Some(theirs))? {
                    Some(content) => self.workspace().write_file(name, &content)?,
                    None => self.workspace().remove_file(name)?,
                }
                index.stage_add(name, theirs.clone());
                Ok(false)
            }
            Resolution::Conflict { ours, theirs } => {
                let ours = self.blob_content(ours.as_ref())?;
                let theirs = self.blob_content(theirs.as_ref())?;
                let merged = Bytes::from(render_conflict(ours.as_deref(), theirs.as_deref()));

                self.workspace().write_file(name, &merged)?;
                let blob = Blob::new(name, Some(merged));
                self.database().stage(&blob)?;
                index.stage_add(name, blob.object_id().clone());

                writeln!(
                    self.writer(),
                    "CONFLICT (content): Merge conflict in {}",
                    name
                )?;
                Ok(true)
            }
        }
    }

    fn blob_content(&self, oid: Option<&ObjectId>) -> anyhow::Result<Option<Bytes>> {
        let Some(oid) = oid else {
            return Ok(None);
        };

        let blob = self
            .database()
            .parse_object_as_blob(oid)?
            .with_context(|| format!("Failed to parse blob object {}", oid))?;

        Ok(blob.content().cloned())
    }
}
