//! Graph input document.
//!
//! ```json
//! {
//!   "graph_id": "task_graph_ntask_3_max_dep_1_seed_7",
//!   "random_seed": 7,
//!   "max_dependencies": 1,
//!   "tasks": [
//!     { "id": "task1", "duration": 12, "memory": 512, "dependencies": [] },
//!     { "id": "task2", "duration": 7, "memory": 256, "dependencies": ["task1"] }
//!   ]
//! }
//! ```
//!
//! Only `tasks` is required; the other fields are written by the generator.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Task, TaskGraph};

/// Serialized task graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_dependencies: Option<usize>,
    pub tasks: Vec<Task>,
}

impl GraphDocument {
    /// Wraps tasks in a document without metadata.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            graph_id: None,
            random_seed: None,
            max_dependencies: None,
            tasks,
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads a document from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document as pretty-printed JSON.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json_string_pretty()?)?;
        Ok(())
    }

    /// Builds the task graph. Fails on duplicate ids or invalid durations.
    pub fn into_graph(self) -> Result<TaskGraph> {
        TaskGraph::new(self.tasks)
    }
}
