//! User-facing failures
//!
//! Every command stops at the first failure it detects and reports a single
//! message. Internally commands return `anyhow::Result`; the variants below are
//! raised for domain failures so callers can still downcast and inspect them.

use thiserror::Error;

/// Broad category of a [`RepositoryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotInitialized,
    NotFound,
    AlreadyExists,
    InvalidState,
    Obstruction,
    Divergence,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("Ambiguous commit id {0}; use more characters.")]
    AmbiguousCommit(String),

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("A branch with that name does not exist.")]
    BranchNotFound,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedObstruction,

    #[error("A remote with that name already exists.")]
    RemoteExists,

    #[error("A remote with that name does not exist.")]
    NoSuchRemote,

    #[error("Invalid remote name: {0}")]
    InvalidRemoteName(String),

    #[error("Remote directory not found.")]
    RemoteNotFound,

    #[error("That remote does not have that branch.")]
    NoSuchRemoteBranch,

    #[error("Please pull down remote changes before pushing.")]
    DivergedHistory,
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotInitialized => ErrorKind::NotInitialized,
            RepositoryError::AlreadyInitialized
            | RepositoryError::BranchExists
            | RepositoryError::RemoteExists => ErrorKind::AlreadyExists,
            RepositoryError::FileNotFound
            | RepositoryError::FileNotInCommit
            | RepositoryError::NoSuchCommit
            | RepositoryError::NoSuchBranch
            | RepositoryError::BranchNotFound
            | RepositoryError::NoCommitWithMessage
            | RepositoryError::NothingToRemove
            | RepositoryError::NoSuchRemote
            | RepositoryError::RemoteNotFound
            | RepositoryError::NoSuchRemoteBranch => ErrorKind::NotFound,
            RepositoryError::AmbiguousCommit(_)
            | RepositoryError::InvalidBranchName(_)
            | RepositoryError::InvalidRemoteName(_)
            | RepositoryError::RemoveCurrentBranch
            | RepositoryError::AlreadyOnBranch
            | RepositoryError::EmptyMessage
            | RepositoryError::NothingToCommit
            | RepositoryError::UncommittedChanges
            | RepositoryError::SelfMerge => ErrorKind::InvalidState,
            RepositoryError::UntrackedObstruction => ErrorKind::Obstruction,
            RepositoryError::DivergedHistory => ErrorKind::Divergence,
        }
    }
}
