//! Min-Min list scheduler.
//!
//! # Algorithm
//!
//! While tasks remain unscheduled:
//! 1. Take the ready set (tasks whose dependencies are all committed).
//!    Empty ready set with work left → [`ScheduleError::Stalled`].
//! 2. For every ready task compute its earliest-finish machine against the
//!    current machine ready times (first "min").
//! 3. Pick the ready task with the smallest candidate finish (second "min").
//!    Ready tasks are enumerated in [`TieBreak`](super::TieBreak) order and
//!    only a strictly smaller finish replaces the incumbent.
//! 4. Commit it: record the assignment, advance the machine, update the
//!    ready set.
//!
//! Greedy and non-backtracking; not optimal, but deterministic for a fixed
//! tie-break order and always feasible for a DAG with at least one machine.
//!
//! # Complexity
//! O(n * r * m) where n = tasks, r = ready-set size, m = machines.
//!
//! # Reference
//! Braun et al. (2001), "A Comparison of Eleven Static Heuristics for
//! Mapping a Class of Independent Tasks onto Heterogeneous Distributed
//! Computing Systems"

use tracing::{debug, info, trace, warn};

use super::evaluator::{best_assignment, Candidate};
use super::{ReadySetTracker, SchedulerConfig};
use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, Schedule, TaskGraph};

/// Outcome of a single [`MinMinRun::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// One task was committed.
    Committed(Assignment),
    /// Every task is scheduled.
    Done,
}

/// Min-Min scheduler.
///
/// # Example
///
/// ```
/// use minmin_schedule::models::{Task, TaskGraph};
/// use minmin_schedule::scheduler::{MinMinScheduler, SchedulerConfig};
///
/// let graph = TaskGraph::new(vec![
///     Task::new("A", 2.0),
///     Task::new("B", 3.0).with_dependency("A"),
/// ])
/// .unwrap();
///
/// let schedule = MinMinScheduler::new(SchedulerConfig::new(2))
///     .schedule(&graph)
///     .unwrap();
/// assert_eq!(schedule.makespan(), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct MinMinScheduler {
    config: SchedulerConfig,
}

impl MinMinScheduler {
    /// Creates a scheduler for the given configuration.
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// The configuration used for every run.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Starts a step-wise run over `graph`.
    pub fn start<'g>(&self, graph: &'g TaskGraph) -> Result<MinMinRun<'g>> {
        MinMinRun::new(graph, &self.config)
    }

    /// Schedules every task of `graph`.
    ///
    /// Either the whole graph is scheduled or an error is returned; no
    /// partial schedule escapes.
    pub fn schedule(&self, graph: &TaskGraph) -> Result<Schedule> {
        self.start(graph)?.finish()
    }
}

/// Convenience wrapper: Min-Min with the default tie break.
pub fn min_min_schedule(graph: &TaskGraph, num_machines: usize) -> Result<Schedule> {
    MinMinScheduler::new(SchedulerConfig::new(num_machines)).schedule(graph)
}

/// State of one in-progress scheduling run.
///
/// Owns its machine pool, schedule and ready set. State is consistent
/// between calls to [`step`](Self::step), so a caller may stop there.
#[derive(Debug)]
pub struct MinMinRun<'g> {
    graph: &'g TaskGraph,
    tracker: ReadySetTracker,
    schedule: Schedule,
    finish_times: Vec<Option<f64>>,
    unscheduled: usize,
}

impl<'g> MinMinRun<'g> {
    /// Validates `config` and prepares a fresh run.
    pub fn new(graph: &'g TaskGraph, config: &SchedulerConfig) -> Result<Self> {
        config.validate()?;

        info!(
            tasks = graph.len(),
            machines = config.num_machines,
            tie_break = ?config.tie_break,
            "min-min: starting run"
        );

        Ok(Self {
            graph,
            tracker: ReadySetTracker::initialize(graph, config.tie_break.ranks(graph)),
            schedule: Schedule::new(config.num_machines),
            finish_times: vec![None; graph.len()],
            unscheduled: graph.len(),
        })
    }

    /// Number of tasks not yet committed.
    pub fn remaining(&self) -> usize {
        self.unscheduled
    }

    /// Number of tasks currently ready.
    pub fn ready_count(&self) -> usize {
        self.tracker.len()
    }

    /// Assignments committed so far.
    pub fn assignments(&self) -> &[Assignment] {
        &self.schedule.assignments
    }

    /// Current ready time of each machine.
    pub fn machine_ready(&self) -> &[f64] {
        &self.schedule.machine_ready
    }

    /// Commits the next task.
    pub fn step(&mut self) -> Result<Step> {
        if self.unscheduled == 0 {
            return Ok(Step::Done);
        }

        let best = match self.select() {
            Some(c) => c,
            None => return Err(self.stalled()),
        };
        let assignment = self.commit(best);

        if self.unscheduled == 0 {
            info!(
                tasks = self.graph.len(),
                makespan = self.schedule.makespan(),
                "min-min: run complete"
            );
        }

        Ok(Step::Committed(assignment))
    }

    /// Runs to completion and returns the schedule.
    pub fn finish(mut self) -> Result<Schedule> {
        while let Step::Committed(_) = self.step()? {}
        Ok(self.schedule)
    }

    /// Evaluates every ready task and keeps the globally earliest finish.
    fn select(&self) -> Option<Candidate> {
        self.evaluate_ready()
            .into_iter()
            .fold(None, |best: Option<Candidate>, c| match best {
                Some(b) if b.finish <= c.finish => Some(b),
                _ => Some(c),
            })
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_ready(&self) -> Vec<Candidate> {
        self.evaluate_ready_sequential()
    }

    #[cfg(any(not(feature = "parallel"), test))]
    fn evaluate_ready_sequential(&self) -> Vec<Candidate> {
        self.tracker
            .current_ready()
            .filter_map(|t| {
                best_assignment(
                    self.graph,
                    t,
                    &self.finish_times,
                    &self.schedule.machine_ready,
                )
            })
            .collect()
    }

    /// Evaluates ready tasks on the rayon pool. Results keep ready-set
    /// order, so the reduction in [`select`](Self::select) is unchanged.
    #[cfg(feature = "parallel")]
    fn evaluate_ready(&self) -> Vec<Candidate> {
        use rayon::prelude::*;

        let ready: Vec<usize> = self.tracker.current_ready().collect();
        let finish_times = &self.finish_times;
        let machine_ready = &self.schedule.machine_ready;
        ready
            .par_iter()
            .filter_map(|&t| best_assignment(self.graph, t, finish_times, machine_ready))
            .collect()
    }

    fn commit(&mut self, c: Candidate) -> Assignment {
        let graph = self.graph;
        let task = graph.task(c.task);
        let assignment = Assignment::new(task.id.clone(), c.machine, c.start, c.finish);

        trace!(
            task = %task.id,
            ready = self.tracker.len(),
            "min-min: candidate selected"
        );

        self.schedule.commit(assignment.clone());
        self.finish_times[c.task] = Some(c.finish);
        self.unscheduled -= 1;
        self.tracker.on_task_committed(graph, c.task);

        debug!(
            task = %task.id,
            machine = c.machine,
            start = c.start,
            finish = c.finish,
            remaining = self.unscheduled,
            "min-min: committed"
        );

        assignment
    }

    fn stalled(&self) -> ScheduleError {
        let mut unscheduled: Vec<String> = (0..self.graph.len())
            .filter(|&i| !self.tracker.is_committed(i))
            .map(|i| self.graph.task(i).id.clone())
            .collect();
        unscheduled.sort();

        warn!(
            remaining = unscheduled.len(),
            committed = self.schedule.assignment_count(),
            "min-min: no ready task; graph has a cycle or an unknown dependency"
        );

        ScheduleError::Stalled { unscheduled }
    }
}
