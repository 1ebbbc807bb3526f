//! Per-run scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::TaskGraph;

/// Enumeration order over ready tasks when candidate finish times tie.
///
/// The first task in this order with the minimal finish time wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Ascending task id (lexicographic).
    #[default]
    Id,
    /// Order in which tasks were declared in the input.
    Declaration,
}

impl TieBreak {
    /// Rank of every task under this order, indexed by arena index.
    pub fn ranks(self, graph: &TaskGraph) -> Vec<usize> {
        match self {
            TieBreak::Id => graph.id_ranks().to_vec(),
            TieBreak::Declaration => (0..graph.len()).collect(),
        }
    }
}

impl std::str::FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(TieBreak::Id),
            "declaration" => Ok(TieBreak::Declaration),
            other => Err(format!(
                "invalid tie break: {other} (expected \"id\" or \"declaration\")"
            )),
        }
    }
}

/// Configuration for one scheduling run.
///
/// Built fresh for each invocation; nothing here is shared between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Number of homogeneous machines. Must be at least 1.
    pub num_machines: usize,
    /// Ready-task enumeration order.
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl SchedulerConfig {
    /// Creates a configuration with the default (by id) tie break.
    pub fn new(num_machines: usize) -> Self {
        Self {
            num_machines,
            tie_break: TieBreak::default(),
        }
    }

    /// Sets the tie-break order.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Rejects configurations that cannot place any task.
    pub fn validate(&self) -> Result<()> {
        if self.num_machines == 0 {
            return Err(ScheduleError::InvalidConfiguration(
                "num_machines must be >= 1 (got 0)".to_string(),
            ));
        }
        Ok(())
    }
}
