use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::status::file_change::{FileChangeType, WorkspaceChangeType};
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

/// Snapshot of everything `status` reports
#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) current_branch: BranchName,
    pub(crate) staged_files: BTreeSet<String>,
    pub(crate) removed_files: BTreeSet<String>,
    pub(crate) workspace_changeset: BTreeMap<String, WorkspaceChangeType>,
    pub(crate) untracked_files: BTreeSet<String>,
}

impl StatusInfo {
    /// Sections in display order, each entry already rendered
    pub fn sections(&self) -> Vec<(&'static str, Vec<String>)> {
        let branches = self
            .branches
            .iter()
            .map(|branch| {
                if branch == &self.current_branch {
                    format!("*{}", branch)
                } else {
                    branch.to_string()
                }
            })
            .collect();

        vec![
            ("Branches", branches),
            (
                "Staged Files",
                Self::render(self.staged_files.iter(), |_| FileChangeType::Staged),
            ),
            (
                "Removed Files",
                Self::render(self.removed_files.iter(), |_| FileChangeType::Removed),
            ),
            (
                "Modifications Not Staged For Commit",
                self.workspace_changeset
                    .iter()
                    .map(|(name, change)| FileChangeType::Workspace(*change).render(name))
                    .collect(),
            ),
            (
                "Untracked Files",
                Self::render(self.untracked_files.iter(), |_| FileChangeType::Untracked),
            ),
        ]
    }

    fn render<'a>(
        names: impl Iterator<Item = &'a String>,
        change: impl Fn(&str) -> FileChangeType,
    ) -> Vec<String> {
        names.map(|name| change(name).render(name)).collect()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let head = self.repository.head_commit()?;
        let inspector = Inspector::new(self.repository);

        let mut workspace_changeset = BTreeMap::new();
        let candidates = head
            .files()
            .keys()
            .chain(index.added().keys())
            .collect::<BTreeSet<_>>();
        for name in candidates {
            if let Some(change) = inspector.check_workspace(name, head.files(), index)? {
                workspace_changeset.insert(name.clone(), change);
            }
        }

        let untracked_files = self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|name| inspector.is_listed_untracked(name, head.files(), index))
            .collect();

        Ok(StatusInfo {
            branches: self.repository.refs().list_branches()?,
            current_branch: self.repository.refs().current_branch()?,
            staged_files: index.added().keys().cloned().collect(),
            removed_files: index.removed().iter().cloned().collect(),
            workspace_changeset,
            untracked_files,
        })
    }
}
