//! Incremental ready-set tracking.
//!
//! Each task keeps a count of dependencies not yet committed (unresolved
//! dependency ids count too and never clear). Committing a task decrements
//! its successors' counts; a task whose count reaches zero becomes ready.
//! No step rescans the whole task set.

use std::collections::BTreeSet;

use crate::models::TaskGraph;

/// Set of tasks that are unscheduled and have every dependency committed.
///
/// Ready tasks are kept ordered by a caller-supplied rank so iteration
/// order is deterministic.
#[derive(Debug, Clone)]
pub struct ReadySetTracker {
    pending_deps: Vec<usize>,
    committed: Vec<bool>,
    rank: Vec<usize>,
    ready: BTreeSet<(usize, usize)>,
}

impl ReadySetTracker {
    /// Seeds the ready set with every task that has no dependencies.
    ///
    /// `rank[i]` is the enumeration position of task `i`; see
    /// [`TieBreak::ranks`](super::TieBreak::ranks).
    pub fn initialize(graph: &TaskGraph, rank: Vec<usize>) -> Self {
        debug_assert_eq!(rank.len(), graph.len());

        let pending_deps: Vec<usize> = (0..graph.len())
            .map(|i| graph.predecessors(i).len() + graph.unresolved_dependencies(i).len())
            .collect();

        let ready = pending_deps
            .iter()
            .enumerate()
            .filter(|(_, &n)| n == 0)
            .map(|(i, _)| (rank[i], i))
            .collect();

        Self {
            pending_deps,
            committed: vec![false; graph.len()],
            rank,
            ready,
        }
    }

    /// Records that `task` was committed.
    ///
    /// Removes it from the ready set and promotes successors whose last
    /// pending dependency it was. Committing the same task twice is a no-op.
    pub fn on_task_committed(&mut self, graph: &TaskGraph, task: usize) {
        if self.committed[task] {
            return;
        }
        self.committed[task] = true;
        self.ready.remove(&(self.rank[task], task));

        for &s in graph.successors(task) {
            self.pending_deps[s] -= 1;
            if self.pending_deps[s] == 0 && !self.committed[s] {
                self.ready.insert((self.rank[s], s));
            }
        }
    }

    /// Ready task indices in rank order.
    pub fn current_ready(&self) -> impl Iterator<Item = usize> + '_ {
        self.ready.iter().map(|&(_, i)| i)
    }

    /// Whether `task` is currently ready.
    pub fn is_ready(&self, task: usize) -> bool {
        self.ready.contains(&(self.rank[task], task))
    }

    /// Whether `task` has been committed.
    pub fn is_committed(&self, task: usize) -> bool {
        self.committed[task]
    }

    /// Number of ready tasks.
    pub fn len(&self) -> usize {
        self.ready.len()
    }

    /// Whether no task is ready.
    pub fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }
}
