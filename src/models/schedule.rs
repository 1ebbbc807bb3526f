//! Schedule (solution) model.
//!
//! A schedule records, for every committed task, the machine it runs on
//! and its start/finish times. Assignments are append-only and kept in
//! commit order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A task-machine-time assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned task ID.
    pub task_id: String,
    /// Zero-based machine index.
    pub machine: usize,
    /// Start time.
    pub start: f64,
    /// Finish time (`start + duration`).
    pub finish: f64,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(task_id: impl Into<String>, machine: usize, start: f64, finish: f64) -> Self {
        Self {
            task_id: task_id.into(),
            machine,
            start,
            finish,
        }
    }

    /// Processing time (finish - start).
    #[inline]
    pub fn duration(&self) -> f64 {
        self.finish - self.start
    }

    /// Whether `[start, finish)` intersects the other assignment's interval.
    pub fn overlaps(&self, other: &Assignment) -> bool {
        self.start < other.finish && other.start < self.finish
    }
}

/// A complete schedule produced by one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Assignments in commit order.
    pub assignments: Vec<Assignment>,
    /// Final ready time of each machine.
    pub machine_ready: Vec<f64>,
    #[serde(skip)]
    by_task: HashMap<String, usize>,
}

impl Schedule {
    /// Creates an empty schedule over `num_machines` idle machines.
    pub fn new(num_machines: usize) -> Self {
        Self {
            assignments: Vec::new(),
            machine_ready: vec![0.0; num_machines],
            by_task: HashMap::new(),
        }
    }

    /// Commits an assignment and advances its machine's ready time.
    ///
    /// # Panics
    /// Panics if the machine index is out of range.
    pub(crate) fn commit(&mut self, assignment: Assignment) {
        self.machine_ready[assignment.machine] = assignment.finish;
        self.by_task
            .insert(assignment.task_id.clone(), self.assignments.len());
        self.assignments.push(assignment);
    }

    /// Number of machines.
    pub fn num_machines(&self) -> usize {
        self.machine_ready.len()
    }

    /// Makespan: the latest machine ready time (0 when nothing ran).
    pub fn makespan(&self) -> f64 {
        self.machine_ready.iter().copied().fold(0.0, f64::max)
    }

    /// Finds the assignment for a task.
    pub fn assignment_for_task(&self, task_id: &str) -> Option<&Assignment> {
        match self.by_task.get(task_id) {
            Some(&i) => self.assignments.get(i),
            // Deserialized schedules have no lookup table.
            None if self.by_task.is_empty() => {
                self.assignments.iter().find(|a| a.task_id == task_id)
            }
            None => None,
        }
    }

    /// Returns all assignments on a machine, in commit order.
    pub fn assignments_for_machine(&self, machine: usize) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.machine == machine)
            .collect()
    }

    /// Total busy time on a machine.
    pub fn busy_time(&self, machine: usize) -> f64 {
        self.assignments_for_machine(machine)
            .iter()
            .map(|a| a.duration())
            .sum()
    }

    /// Machine utilization: busy time / makespan.
    ///
    /// Returns `None` if the makespan is zero.
    pub fn machine_utilization(&self, machine: usize) -> Option<f64> {
        let horizon = self.makespan();
        if horizon <= 0.0 {
            return None;
        }
        Some(self.busy_time(machine) / horizon)
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}
