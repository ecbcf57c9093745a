//! Commit history traversal
//!
//! - `commit_graph`: reachability, split points and ancestry over the commit DAG
//! - `rev_list`: first-parent history used by `log`

pub mod commit_graph;
pub mod rev_list;
