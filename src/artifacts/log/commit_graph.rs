//! Commit graph navigation
//!
//! Commits form a DAG through their parent links (one parent for ordinary
//! commits, two for merges, none for the root). The navigator only needs a
//! way to load a commit's parents, so it runs the same against the object
//! database and against in-memory graphs.
//!
//! ## Lowest common ancestor
//!
//! The split point of two tips is found by collecting every ancestor of the
//! first tip, then walking breadth-first from the second tip in parent
//! discovery order; the first commit found in the ancestor set wins. This is
//! a heuristic: in criss-cross histories it may pick a common ancestor that is
//! not the best one, but it is deterministic for a given graph.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// Read-only view over a commit DAG
///
/// # Type Parameters
///
/// * `ParentLoaderFn` - Loads the ordered parent ids of a commit. Should
///   return an empty vector for the root commit.
#[derive(Debug, Clone)]
pub struct CommitGraph<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parent_loader: ParentLoaderFn,
}

impl<ParentLoaderFn> CommitGraph<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(parent_loader: ParentLoaderFn) -> Self {
        Self { parent_loader }
    }

    /// Every commit reachable from `start`, `start` included
    pub fn history(&self, start: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::from([start.clone()]);
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            for parent_id in (self.parent_loader)(&commit_id)? {
                if visited.insert(parent_id.clone()) {
                    queue.push_back(parent_id);
                }
            }
        }

        Ok(visited)
    }

    /// Split point used as the base of a three-way merge
    ///
    /// # Returns
    ///
    /// - `Some(ObjectId)` - the first ancestor of `target` (breadth-first, in
    ///   parent order) that is also an ancestor of `source`
    /// - `None` - the two commits share no history
    pub fn lowest_common_ancestor(
        &self,
        source: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let source_history = self.history(source)?;

        let mut visited = HashSet::from([target.clone()]);
        let mut queue = VecDeque::from([target.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            if source_history.contains(&commit_id) {
                tracing::debug!(%source, %target, ancestor = %commit_id, "found split point");
                return Ok(Some(commit_id));
            }

            for parent_id in (self.parent_loader)(&commit_id)? {
                if visited.insert(parent_id.clone()) {
                    queue.push_back(parent_id);
                }
            }
        }

        Ok(None)
    }

    /// Whether `ancestor` is in the history of `descendant`
    pub fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> anyhow::Result<bool> {
        Ok(self.history(descendant)?.contains(ancestor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::collections::HashMap;

    /// In-memory commit store for testing
    #[derive(Debug, Clone, Default)]
    struct InMemoryCommitStore {
        commits: HashMap<ObjectId, Vec<ObjectId>>,
    }

    impl InMemoryCommitStore {
        fn add_commit(&mut self, commit_id: ObjectId, parents: Vec<ObjectId>) {
            self.commits.insert(commit_id, parents);
        }

        fn get_parents(&self, commit_id: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
            self.commits
                .get(commit_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Commit {commit_id} not found in test store"))
        }
    }

    fn create_oid(id: &str) -> ObjectId {
        // deterministic 40-character hex id spelling out the name
        let mut hex_string = id
            .as_bytes()
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect::<String>();

        while hex_string.len() < 40 {
            hex_string.push('0');
        }
        hex_string.truncate(40);

        ObjectId::try_parse(hex_string).unwrap()
    }

    #[fixture]
    fn linear_history() -> InMemoryCommitStore {
        let mut store = InMemoryCommitStore::default();

        // Linear history: A <- B <- C <- D
        store.add_commit(create_oid("commit_a"), vec![]);
        store.add_commit(create_oid("commit_b"), vec![create_oid("commit_a")]);
        store.add_commit(create_oid("commit_c"), vec![create_oid("commit_b")]);
        store.add_commit(create_oid("commit_d"), vec![create_oid("commit_c")]);

        store
    }

    #[fixture]
    fn simple_merge() -> InMemoryCommitStore {
        let mut store = InMemoryCommitStore::default();

        //     A
        //    / \
        //   B   C
        //   |   |
        //   |   E
        //    \ /
        //     D (merge commit)
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let c = create_oid("commit_c");
        let e = create_oid("commit_e");

        store.add_commit(a.clone(), vec![]);
        store.add_commit(b.clone(), vec![a.clone()]);
        store.add_commit(c.clone(), vec![a]);
        store.add_commit(e.clone(), vec![c]);
        store.add_commit(create_oid("commit_d"), vec![b, e]);

        store
    }

    #[fixture]
    fn criss_cross_merge() -> InMemoryCommitStore {
        let mut store = InMemoryCommitStore::default();

        //     A
        //    / \
        //   B   C
        //   |\ /|
        //   | X |
        //   |/ \|
        //   D   E
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let c = create_oid("commit_c");

        store.add_commit(a.clone(), vec![]);
        store.add_commit(b.clone(), vec![a.clone()]);
        store.add_commit(c.clone(), vec![a]);
        store.add_commit(create_oid("commit_d"), vec![b.clone(), c.clone()]);
        store.add_commit(create_oid("commit_e"), vec![c, b]);

        store
    }

    #[rstest]
    fn history_contains_every_ancestor(simple_merge: InMemoryCommitStore) {
        let graph = CommitGraph::new(|oid| simple_merge.get_parents(oid));

        let history = graph.history(&create_oid("commit_d")).unwrap();

        assert_eq!(history.len(), 5);
        assert!(history.contains(&create_oid("commit_a")));
        assert!(history.contains(&create_oid("commit_e")));
    }

    #[rstest]
    fn linear_history_split_point_is_the_older_commit(linear_history: InMemoryCommitStore) {
        let b = create_oid("commit_b");
        let d = create_oid("commit_d");
        let graph = CommitGraph::new(|oid| linear_history.get_parents(oid));

        assert_eq!(graph.lowest_common_ancestor(&b, &d).unwrap(), Some(b.clone()));
        assert_eq!(graph.lowest_common_ancestor(&d, &b).unwrap(), Some(b.clone()));
        assert_eq!(graph.lowest_common_ancestor(&d, &d).unwrap(), Some(d));
    }

    #[rstest]
    fn diverged_branches_meet_at_the_fork(simple_merge: InMemoryCommitStore) {
        let graph = CommitGraph::new(|oid| simple_merge.get_parents(oid));

        assert_eq!(
            graph
                .lowest_common_ancestor(&create_oid("commit_b"), &create_oid("commit_e"))
                .unwrap(),
            Some(create_oid("commit_a"))
        );
    }

    #[rstest]
    fn merged_branch_is_an_ancestor_of_the_merge(simple_merge: InMemoryCommitStore) {
        let graph = CommitGraph::new(|oid| simple_merge.get_parents(oid));
        let d = create_oid("commit_d");
        let e = create_oid("commit_e");

        assert_eq!(graph.lowest_common_ancestor(&d, &e).unwrap(), Some(e.clone()));
        assert!(graph.is_ancestor(&e, &d).unwrap());
        assert!(!graph.is_ancestor(&d, &e).unwrap());
    }

    #[rstest]
    fn criss_cross_picks_the_first_parent_of_the_target(criss_cross_merge: InMemoryCommitStore) {
        let graph = CommitGraph::new(|oid| criss_cross_merge.get_parents(oid));

        // B and C are both best common ancestors; the walk from E sees C first
        assert_eq!(
            graph
                .lowest_common_ancestor(&create_oid("commit_d"), &create_oid("commit_e"))
                .unwrap(),
            Some(create_oid("commit_c"))
        );
        assert_eq!(
            graph
                .lowest_common_ancestor(&create_oid("commit_e"), &create_oid("commit_d"))
                .unwrap(),
            Some(create_oid("commit_b"))
        );
    }

    #[test]
    fn unrelated_roots_share_no_ancestor() {
        let mut store = InMemoryCommitStore::default();
        store.add_commit(create_oid("root_one"), vec![]);
        store.add_commit(create_oid("root_two"), vec![]);
        let graph = CommitGraph::new(|oid| store.get_parents(oid));

        assert_eq!(
            graph
                .lowest_common_ancestor(&create_oid("root_one"), &create_oid("root_two"))
                .unwrap(),
            None
        );
    }

    #[test]
    fn missing_commits_propagate_the_loader_error() {
        let store = InMemoryCommitStore::default();
        let graph = CommitGraph::new(|oid| store.get_parents(oid));

        assert!(graph.history(&create_oid("ghost")).is_err());
    }
}
