//! Seeded random task-graph generator.
//!
//! Produces acyclic graphs for benchmarking and testing: every task may
//! only depend on tasks generated before it.
//!
//! - Tasks are named `task1..taskN`.
//! - Durations are uniform in `5..=30`.
//! - Memory is one of 256, 512, 1024 or 2048.
//! - `task1` has no dependencies; each later task draws between 1 and
//!   `max_dependencies` distinct parents among earlier tasks.
//!
//! The seed is always explicit: given the same [`GeneratorConfig`] (with a
//! seed), output is identical across runs.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::GraphDocument;
use crate::models::Task;

const DURATION_RANGE: std::ops::RangeInclusive<u32> = 5..=30;
const MEMORY_CHOICES: [f64; 4] = [256.0, 512.0, 1024.0, 2048.0];
const MAX_DRAWN_SEED: u64 = 100_000;

/// Generator parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of tasks to generate.
    pub num_tasks: usize,
    /// Upper bound on dependencies per task. Drawn from `1..num_tasks` when
    /// absent. Zero yields independent tasks.
    #[serde(default)]
    pub max_dependencies: Option<usize>,
    /// RNG seed. Drawn from `0..100_000` when absent and recorded in the
    /// output document.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new(num_tasks: usize) -> Self {
        Self {
            num_tasks,
            max_dependencies: None,
            seed: None,
        }
    }

    pub fn with_max_dependencies(mut self, max_dependencies: usize) -> Self {
        self.max_dependencies = Some(max_dependencies);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Generates a graph document.
///
/// The returned document records the seed and dependency bound that were
/// actually used, so it can be reproduced exactly.
pub fn generate(config: &GeneratorConfig) -> GraphDocument {
    let seed = config
        .seed
        .unwrap_or_else(|| rand::rng().random_range(0..MAX_DRAWN_SEED));
    let mut rng = StdRng::seed_from_u64(seed);

    let n = config.num_tasks;
    let max_dependencies = config.max_dependencies.unwrap_or_else(|| {
        if n > 1 {
            rng.random_range(1..n)
        } else {
            1
        }
    });

    let tasks = generate_tasks(n, max_dependencies, &mut rng);

    debug!(tasks = n, max_dependencies, seed, "generator: produced task graph");

    GraphDocument {
        graph_id: Some(format!(
            "task_graph_ntask_{n}_max_dep_{max_dependencies}_seed_{seed}"
        )),
        random_seed: Some(seed),
        max_dependencies: Some(max_dependencies),
        tasks,
    }
}

/// Generates `num_tasks` tasks from an existing RNG.
pub fn generate_tasks<R: Rng>(num_tasks: usize, max_dependencies: usize, rng: &mut R) -> Vec<Task> {
    let ids: Vec<String> = (1..=num_tasks).map(|i| format!("task{i}")).collect();
    let cap = max_dependencies.min(num_tasks.saturating_sub(1));

    let mut tasks = Vec::with_capacity(num_tasks);
    for (i, id) in ids.iter().enumerate() {
        let duration = f64::from(rng.random_range(DURATION_RANGE));
        let memory = *MEMORY_CHOICES.choose(rng).unwrap_or(&MEMORY_CHOICES[0]);

        let mut task = Task::new(id.clone(), duration).with_memory(memory);
        if i > 0 && cap > 0 {
            let count = rng.random_range(1..=cap).min(i);
            task = task.with_dependencies(ids[..i].choose_multiple(rng, count).cloned());
        }
        tasks.push(task);
    }
    tasks
}
