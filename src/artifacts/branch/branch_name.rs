use crate::artifacts::branch::{DEFAULT_BRANCH, INVALID_BRANCH_NAME_REGEX};
use crate::errors::RepositoryError;
use anyhow::Context;

const HEADS_PREFIX: &str = "refs/heads";
const REMOTES_PREFIX: &str = "refs/remotes";

/// Name of a local branch
///
/// Local names never contain `/`; that separator is reserved for addressing
/// remote-tracking branches as `<remote>/<branch>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() || name.contains('/') {
            return Err(RepositoryError::InvalidBranchName(name).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(RepositoryError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A branch pointer, local or remote-tracking
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RefName {
    /// `refs/heads/<branch>`
    Local(BranchName),
    /// `refs/remotes/<remote>/<branch>`
    Remote { remote: String, branch: BranchName },
}

impl RefName {
    /// Parse `<branch>` or `<remote>/<branch>`
    pub fn try_parse(name: &str) -> anyhow::Result<Self> {
        match name.split_once('/') {
            Some((remote, branch)) if !remote.is_empty() => Ok(RefName::Remote {
                remote: remote.to_string(),
                branch: BranchName::try_parse(branch.to_string())?,
            }),
            Some(_) => Err(RepositoryError::InvalidBranchName(name.to_string()).into()),
            None => Ok(RefName::Local(BranchName::try_parse(name.to_string())?)),
        }
    }

    pub fn remote_tracking(remote: &str, branch: BranchName) -> Self {
        RefName::Remote {
            remote: remote.to_string(),
            branch,
        }
    }

    /// Location relative to the metadata directory
    pub fn as_ref_path(&self) -> String {
        match self {
            RefName::Local(branch) => format!("{HEADS_PREFIX}/{branch}"),
            RefName::Remote { remote, branch } => format!("{REMOTES_PREFIX}/{remote}/{branch}"),
        }
    }
}

impl From<BranchName> for RefName {
    fn from(branch: BranchName) -> Self {
        RefName::Local(branch)
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefName::Local(branch) => write!(f, "{branch}"),
            RefName::Remote { remote, branch } => write!(f, "{remote}/{branch}"),
        }
    }
}
