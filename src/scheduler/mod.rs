//! Min-Min scheduling and KPI evaluation.
//!
//! - [`ReadySetTracker`] keeps the set of tasks whose dependencies are all
//!   committed, updated incrementally on every commit.
//! - [`best_assignment`] places one task on its earliest-finishing machine.
//! - [`MinMinScheduler`] runs the greedy loop; [`MinMinRun`] exposes it one
//!   commit at a time.
//! - [`ScheduleKpi`] computes makespan, utilization and lower bounds.
//!
//! # References
//!
//! - Ibarra & Kim (1977), "Heuristic Algorithms for Scheduling Independent
//!   Tasks on Nonidentical Processors"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5

mod config;
mod evaluator;
mod kpi;
mod min_min;
mod ready;

pub use config::{SchedulerConfig, TieBreak};
pub use evaluator::{best_assignment, earliest_dependency_finish, Candidate};
pub use kpi::{critical_path_length, ScheduleKpi};
pub use min_min::{min_min_schedule, MinMinRun, MinMinScheduler, Step};
pub use ready::ReadySetTracker;
