//! Earliest-finish placement of a single task.
//!
//! # Algorithm
//!
//! 1. `dep_finish` = latest finish among the task's predecessors (0 if none).
//! 2. On machine `m`: `start = max(ready[m], dep_finish)`,
//!    `finish = start + duration`.
//! 3. Keep the machine with the smallest finish. Machines are scanned in
//!    index order and only a strictly smaller finish replaces the incumbent,
//!    so ties go to the lowest machine index.
//!
//! # Complexity
//! O(p + m) where p = predecessors, m = machines.

use crate::models::TaskGraph;

/// Best placement found for one task against a frozen machine state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Arena index of the task.
    pub task: usize,
    /// Chosen machine index.
    pub machine: usize,
    /// Start time on that machine.
    pub start: f64,
    /// Finish time on that machine.
    pub finish: f64,
}

/// Latest finish time among the predecessors of `task`.
///
/// Uncommitted predecessors are ignored; the scheduler only evaluates tasks
/// whose predecessors are all committed.
pub fn earliest_dependency_finish(
    graph: &TaskGraph,
    task: usize,
    finish_times: &[Option<f64>],
) -> f64 {
    graph
        .predecessors(task)
        .iter()
        .filter_map(|&p| finish_times[p])
        .fold(0.0, f64::max)
}

/// Computes the earliest-finishing machine for `task`.
///
/// `finish_times` is indexed by arena index (`None` = not committed);
/// `machine_ready` holds each machine's current ready time. Pure: reads but
/// never mutates either slice. Returns `None` only when there are no
/// machines.
pub fn best_assignment(
    graph: &TaskGraph,
    task: usize,
    finish_times: &[Option<f64>],
    machine_ready: &[f64],
) -> Option<Candidate> {
    let duration = graph.task(task).duration;
    let dep_finish = earliest_dependency_finish(graph, task, finish_times);

    let mut best: Option<Candidate> = None;
    for (machine, &ready) in machine_ready.iter().enumerate() {
        let start = ready.max(dep_finish);
        let finish = start + duration;
        if best.map_or(true, |b| finish < b.finish) {
            best = Some(Candidate {
                task,
                machine,
                start,
                finish,
            });
        }
    }
    best
}
