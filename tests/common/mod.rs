#![allow(dead_code)]

use std::sync::Once;

use minmin_schedule::models::{Schedule, Task, TaskGraph};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Logs are captured per-test and only shown for failures
/// (unless run with `-- --nocapture`). Enable levels with `RUST_LOG=debug`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Builds a graph from `(id, duration, deps)` triples.
pub fn graph(rows: &[(&str, f64, &[&str])]) -> TaskGraph {
    let tasks = rows
        .iter()
        .map(|&(id, duration, deps)| {
            Task::new(id, duration).with_dependencies(deps.iter().copied())
        })
        .collect();
    TaskGraph::new(tasks).expect("test graph must be well-formed")
}

/// `(machine, start, finish)` of a scheduled task.
pub fn placement(schedule: &Schedule, id: &str) -> (usize, f64, f64) {
    let a = schedule
        .assignment_for_task(id)
        .unwrap_or_else(|| panic!("task {id} not scheduled"));
    (a.machine, a.start, a.finish)
}

/// Checks coverage, precedence, per-machine ordering and makespan.
pub fn assert_feasible(graph: &TaskGraph, schedule: &Schedule) {
    assert_eq!(schedule.assignment_count(), graph.len(), "every task exactly once");

    for task in graph.tasks() {
        let (_, start, finish) = placement(schedule, &task.id);
        assert_eq!(finish, start + task.duration);
        for dep in &task.dependencies {
            let (_, _, dep_finish) = placement(schedule, dep);
            assert!(
                start >= dep_finish,
                "{} starts at {start} before dependency {dep} finishes at {dep_finish}",
                task.id
            );
        }
    }

    for m in 0..schedule.num_machines() {
        let on_machine = schedule.assignments_for_machine(m);
        for pair in on_machine.windows(2) {
            assert!(pair[0].finish <= pair[1].finish, "finish times non-decreasing");
            assert!(pair[0].finish <= pair[1].start, "no overlap on machine {m}");
        }
        let last = on_machine.last().map_or(0.0, |a| a.finish);
        assert_eq!(schedule.machine_ready[m], last);
    }

    let max_finish = schedule
        .assignments
        .iter()
        .map(|a| a.finish)
        .fold(0.0, f64::max);
    assert_eq!(schedule.makespan(), max_finish);
}
