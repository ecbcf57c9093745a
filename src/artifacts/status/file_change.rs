use colored::Colorize;

/// How a tracked file in the working directory departs from what the next
/// commit would record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceChangeType {
    Modified,
    Deleted,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::Modified => "modified",
            WorkspaceChangeType::Deleted => "deleted",
        }
    }
}

/// One line of a status section
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChangeType {
    Staged,
    Removed,
    Workspace(WorkspaceChangeType),
    Untracked,
}

impl FileChangeType {
    /// Render `name` the way its status section lists it
    pub fn render(&self, name: &str) -> String {
        match self {
            FileChangeType::Staged => name.green().to_string(),
            FileChangeType::Removed => name.red().to_string(),
            FileChangeType::Workspace(change) => {
                let label: &str = change.into();
                format!("{} ({})", name, label).red().to_string()
            }
            FileChangeType::Untracked => name.red().to_string(),
        }
    }
}
