//! Min-Min list scheduling of task DAGs onto identical machines.
//!
//! Given tasks with durations and precedence dependencies, the scheduler
//! repeatedly looks at every ready task, finds the machine on which it would
//! finish earliest, and commits the ready task with the smallest such finish
//! time. The result maps each machine to an ordered timeline of task starts.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `TaskGraph`, `Assignment`, `Schedule`
//! - **`scheduler`**: Ready-set tracking, machine evaluation, the Min-Min loop, KPIs
//! - **`document`**: JSON graph input and `core_<n>` timeline output
//! - **`generator`**: Seeded random DAG generation
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown deps, cycles)
//!
//! # Example
//!
//! ```
//! use minmin_schedule::document::MachineTimelines;
//! use minmin_schedule::models::{Task, TaskGraph};
//! use minmin_schedule::scheduler::min_min_schedule;
//!
//! let graph = TaskGraph::new(vec![
//!     Task::new("A", 2.0),
//!     Task::new("B", 3.0).with_dependency("A"),
//! ])
//! .unwrap();
//!
//! let schedule = min_min_schedule(&graph, 2).unwrap();
//! assert_eq!(schedule.makespan(), 5.0);
//!
//! let timelines = MachineTimelines::from_schedule(&schedule);
//! assert_eq!(timelines.machine(0).unwrap().len(), 2);
//! ```
//!
//! # References
//!
//! - Ibarra & Kim (1977), "Heuristic Algorithms for Scheduling Independent
//!   Tasks on Nonidentical Processors"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod cli;
pub mod document;
pub mod error;
pub mod generator;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod validation;

use std::path::Path;

use anyhow::{bail, Context};
use tracing::{error, info};

use crate::cli::{CliArgs, Command};
use crate::document::{GraphDocument, MachineTimelines};
use crate::generator::GeneratorConfig;
use crate::scheduler::{MinMinScheduler, ScheduleKpi, SchedulerConfig};

pub use error::{Result, ScheduleError};

/// Top-level entry point used by `main.rs`.
pub fn run(args: CliArgs) -> anyhow::Result<()> {
    match args.command {
        Command::Schedule {
            input,
            machines,
            output,
            tie_break,
            validate,
        } => {
            let doc = GraphDocument::from_path(&input)
                .with_context(|| format!("failed to read graph from {}", input.display()))?;
            info!(path = %input.display(), tasks = doc.tasks.len(), "loaded graph document");

            if validate {
                if let Err(errors) = validation::validate_tasks(&doc.tasks) {
                    for e in &errors {
                        error!("{e}");
                    }
                    bail!("graph failed validation with {} error(s)", errors.len());
                }
            }

            let graph = doc.into_graph()?;
            let config = SchedulerConfig::new(machines).with_tie_break(tie_break.into());
            let schedule = MinMinScheduler::new(config).schedule(&graph)?;

            let kpi = ScheduleKpi::calculate(&schedule, &graph);
            info!(
                makespan = kpi.makespan,
                avg_utilization = kpi.avg_utilization,
                lower_bound = ?kpi.lower_bound,
                "schedule complete"
            );

            let timelines = MachineTimelines::from_schedule(&schedule);
            emit(&timelines.to_json_string_pretty()?, output.as_deref())
        }
        Command::Generate {
            num_tasks,
            max_dependencies,
            seed,
            output,
        } => {
            let config = GeneratorConfig {
                num_tasks,
                max_dependencies,
                seed,
            };
            let doc = generator::generate(&config);
            info!(
                graph_id = doc.graph_id.as_deref().unwrap_or_default(),
                "generated graph"
            );
            emit(&doc.to_json_string_pretty()?, output.as_deref())
        }
    }
}

fn emit(json: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => println!("{json}"),
    }
    Ok(())
}
