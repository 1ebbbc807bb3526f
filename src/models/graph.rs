//! Task precedence graph.
//!
//! Tasks live in a dense arena in declaration order and are addressed by
//! `usize` index. Predecessor and successor lists are index-based.
//!
//! The graph does not check acyclicity. A dependency naming an id that is
//! not in the graph is kept as *unresolved*; such a task can never become
//! ready, which the scheduler reports as a stall.

use std::collections::HashMap;

use super::Task;
use crate::error::{Result, ScheduleError};

/// Immutable DAG of tasks.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
    predecessors: Vec<Vec<usize>>,
    successors: Vec<Vec<usize>>,
    unresolved: Vec<Vec<String>>,
    /// Position of each task when all tasks are sorted by id.
    id_rank: Vec<usize>,
}

impl TaskGraph {
    /// Builds a graph from tasks.
    ///
    /// Fails on duplicate ids and on durations that are negative, NaN or
    /// infinite. Repeated dependency ids on one task are collapsed.
    pub fn new(tasks: Vec<Task>) -> Result<Self> {
        let mut index = HashMap::with_capacity(tasks.len());
        for (i, task) in tasks.iter().enumerate() {
            if !task.has_valid_duration() {
                return Err(ScheduleError::InvalidDuration {
                    task: task.id.clone(),
                    duration: task.duration,
                });
            }
            if index.insert(task.id.clone(), i).is_some() {
                return Err(ScheduleError::DuplicateTaskId(task.id.clone()));
            }
        }

        let n = tasks.len();
        let mut predecessors = vec![Vec::new(); n];
        let mut successors = vec![Vec::new(); n];
        let mut unresolved = vec![Vec::new(); n];

        for (i, task) in tasks.iter().enumerate() {
            for dep in &task.dependencies {
                match index.get(dep) {
                    Some(&p) => {
                        if !predecessors[i].contains(&p) {
                            predecessors[i].push(p);
                            successors[p].push(i);
                        }
                    }
                    None => {
                        if !unresolved[i].contains(dep) {
                            unresolved[i].push(dep.clone());
                        }
                    }
                }
            }
        }

        let mut by_id: Vec<usize> = (0..n).collect();
        by_id.sort_by(|&a, &b| tasks[a].id.cmp(&tasks[b].id));
        let mut id_rank = vec![0; n];
        for (rank, &i) in by_id.iter().enumerate() {
            id_rank[i] = rank;
        }

        Ok(Self {
            tasks,
            index,
            predecessors,
            successors,
            unresolved,
            id_rank,
        })
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the graph has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn task(&self, index: usize) -> &Task {
        &self.tasks[index]
    }

    /// All tasks in declaration order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Arena index of the task with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// All task ids in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.id.as_str())
    }

    /// Indices of tasks that must finish before `index` starts.
    pub fn predecessors(&self, index: usize) -> &[usize] {
        &self.predecessors[index]
    }

    /// Indices of tasks that depend directly on `index`.
    pub fn successors(&self, index: usize) -> &[usize] {
        &self.successors[index]
    }

    /// Dependency ids of `index` that name no task in this graph.
    pub fn unresolved_dependencies(&self, index: usize) -> &[String] {
        &self.unresolved[index]
    }

    /// Predecessor ids of the task with the given id.
    pub fn predecessor_ids(&self, id: &str) -> Option<Vec<&str>> {
        let i = self.index_of(id)?;
        Some(
            self.predecessors[i]
                .iter()
                .map(|&p| self.tasks[p].id.as_str())
                .collect(),
        )
    }

    /// Successor ids of the task with the given id.
    pub fn successor_ids(&self, id: &str) -> Option<Vec<&str>> {
        let i = self.index_of(id)?;
        Some(
            self.successors[i]
                .iter()
                .map(|&s| self.tasks[s].id.as_str())
                .collect(),
        )
    }

    /// Rank of each task in ascending-id order, indexed by arena index.
    pub fn id_ranks(&self) -> &[usize] {
        &self.id_rank
    }

    /// Whether any task references an id outside the graph.
    pub fn has_unresolved_dependencies(&self) -> bool {
        self.unresolved.iter().any(|u| !u.is_empty())
    }

    /// Kahn topological order over resolved edges.
    ///
    /// Returns `None` when the resolved edges contain a cycle.
    pub fn topological_order(&self) -> Option<Vec<usize>> {
        let n = self.len();
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(Vec::len).collect();
        let mut queue: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);

        while let Some(i) = queue.pop() {
            order.push(i);
            for &s in &self.successors[i] {
                in_degree[s] -= 1;
                if in_degree[s] == 0 {
                    queue.push(s);
                }
            }
        }

        (order.len() == n).then_some(order)
    }
}
