//! Task model.
//!
//! A task is one non-preemptive unit of work with a fixed duration and a
//! set of tasks that must finish before it may start.

use serde::{Deserialize, Serialize};

/// A task to be placed on a machine.
///
/// This is also the record format of the `tasks` array in a graph
/// document, so field names follow the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Processing time. Must be finite and non-negative.
    pub duration: f64,
    /// Memory requirement. Carried through documents; not used for placement.
    #[serde(default)]
    pub memory: f64,
    /// Ids of tasks that must finish before this one starts.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Task {
    /// Creates a task with no dependencies and zero memory.
    pub fn new(id: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            duration,
            memory: 0.0,
            dependencies: Vec::new(),
        }
    }

    /// Sets the memory requirement.
    pub fn with_memory(mut self, memory: f64) -> Self {
        self.memory = memory;
        self
    }

    /// Adds a dependency.
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    /// Adds several dependencies.
    pub fn with_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Whether the duration is usable for scheduling.
    pub fn has_valid_duration(&self) -> bool {
        self.duration.is_finite() && self.duration >= 0.0
    }
}
