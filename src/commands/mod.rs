//! Command implementations
//!
//! Commands are `impl Repository` blocks split into two groups:
//!
//! - `plumbing`: low-level access to the object database (hash-object, cat-file)
//!   and the commit writer shared by `commit` and `merge`
//! - `porcelain`: the user-facing version control workflow
//!
//! Every command stops at the first failure and leaves the repository as it
//! found it; failures are raised as [`crate::errors::RepositoryError`].

pub mod plumbing;
pub mod porcelain;
