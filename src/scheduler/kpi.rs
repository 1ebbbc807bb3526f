//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest machine ready time |
//! | Total Work | Sum of task durations |
//! | Utilization | Busy time / makespan, per machine |
//! | Idle Time | machines * makespan - total work |
//! | Critical Path | Longest duration-weighted dependency chain |
//! | Lower Bound | max(critical path, total work / machines) |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 5: Parallel Machine Models

use serde::Serialize;

use crate::models::{Schedule, TaskGraph};

/// Schedule performance indicators.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleKpi {
    /// Makespan: latest machine ready time.
    pub makespan: f64,
    /// Sum of all scheduled task durations.
    pub total_work: f64,
    /// Busy time per machine.
    pub busy_by_machine: Vec<f64>,
    /// Utilization per machine (0.0..1.0).
    pub utilization_by_machine: Vec<f64>,
    /// Mean machine utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Total idle time across machines up to the makespan.
    pub total_idle: f64,
    /// Longest duration-weighted chain. `None` if the graph is cyclic.
    pub critical_path: Option<f64>,
    /// Makespan lower bound. `None` if the graph is cyclic.
    pub lower_bound: Option<f64>,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and the graph it was built from.
    pub fn calculate(schedule: &Schedule, graph: &TaskGraph) -> Self {
        let makespan = schedule.makespan();
        let machines = schedule.num_machines();

        let mut busy_by_machine = vec![0.0; machines];
        for a in &schedule.assignments {
            if let Some(busy) = busy_by_machine.get_mut(a.machine) {
                *busy += a.duration();
            }
        }
        let total_work: f64 = busy_by_machine.iter().sum();

        let utilization_by_machine: Vec<f64> = busy_by_machine
            .iter()
            .map(|&busy| if makespan > 0.0 { busy / makespan } else { 0.0 })
            .collect();
        let avg_utilization = if machines == 0 {
            0.0
        } else {
            utilization_by_machine.iter().sum::<f64>() / machines as f64
        };

        let total_idle = (machines as f64 * makespan - total_work).max(0.0);

        let critical_path = critical_path_length(graph);
        let lower_bound = critical_path.map(|cp| {
            if machines == 0 {
                cp
            } else {
                let total: f64 = graph.tasks().iter().map(|t| t.duration).sum();
                cp.max(total / machines as f64)
            }
        });

        Self {
            makespan,
            total_work,
            busy_by_machine,
            utilization_by_machine,
            avg_utilization,
            total_idle,
            critical_path,
            lower_bound,
        }
    }

    /// Makespan divided by the lower bound (1.0 = provably optimal).
    ///
    /// Returns `None` when the bound is unknown or zero.
    pub fn bound_ratio(&self) -> Option<f64> {
        match self.lower_bound {
            Some(lb) if lb > 0.0 => Some(self.makespan / lb),
            _ => None,
        }
    }
}

/// Longest path through the graph weighted by task durations.
///
/// Returns `None` if the resolved dependency edges contain a cycle.
pub fn critical_path_length(graph: &TaskGraph) -> Option<f64> {
    let order = graph.topological_order()?;
    let mut finish = vec![0.0_f64; graph.len()];

    for &i in &order {
        let start = graph
            .predecessors(i)
            .iter()
            .map(|&p| finish[p])
            .fold(0.0, f64::max);
        finish[i] = start + graph.task(i).duration;
    }

    Some(finish.into_iter().fold(0.0, f64::max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::scheduler::min_min_schedule;

    fn diamond() -> TaskGraph {
        TaskGraph::new(vec![
            Task::new("A", 2.0),
            Task::new("B", 3.0).with_dependency("A"),
            Task::new("C", 1.0).with_dependency("A"),
            Task::new("D", 2.0).with_dependencies(["B", "C"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_critical_path() {
        assert_eq!(critical_path_length(&diamond()), Some(7.0));
    }

    #[test]
    fn test_critical_path_cyclic() {
        let g = TaskGraph::new(vec![
            Task::new("P", 1.0).with_dependency("Q"),
            Task::new("Q", 1.0).with_dependency("P"),
        ])
        .unwrap();
        assert_eq!(critical_path_length(&g), None);
    }

    #[test]
    fn test_kpi_diamond() {
        let g = diamond();
        let s = min_min_schedule(&g, 2).unwrap();
        let kpi = ScheduleKpi::calculate(&s, &g);

        assert_eq!(kpi.makespan, 7.0);
        assert_eq!(kpi.total_work, 8.0);
        // M0: A, C, D = 5; M1: B = 3
        assert_eq!(kpi.busy_by_machine, vec![5.0, 3.0]);
        assert!((kpi.utilization_by_machine[0] - 5.0 / 7.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 8.0 / 14.0).abs() < 1e-10);
        assert!((kpi.total_idle - 6.0).abs() < 1e-10);
        assert_eq!(kpi.critical_path, Some(7.0));
        assert_eq!(kpi.lower_bound, Some(7.0));
        assert!((kpi.bound_ratio().unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_work_bound() {
        // Four independent unit tasks on two machines: bound = 4 / 2 = 2.
        let g = TaskGraph::new((0..4).map(|i| Task::new(format!("t{i}"), 1.0)).collect())
            .unwrap();
        let s = min_min_schedule(&g, 2).unwrap();
        let kpi = ScheduleKpi::calculate(&s, &g);
        assert_eq!(kpi.makespan, 2.0);
        assert_eq!(kpi.critical_path, Some(1.0));
        assert_eq!(kpi.lower_bound, Some(2.0));
        assert!((kpi.avg_utilization - 1.0).abs() < 1e-10);
        assert_eq!(kpi.total_idle, 0.0);
    }

    #[test]
    fn test_kpi_empty() {
        let g = TaskGraph::new(Vec::new()).unwrap();
        let s = min_min_schedule(&g, 2).unwrap();
        let kpi = ScheduleKpi::calculate(&s, &g);
        assert_eq!(kpi.makespan, 0.0);
        assert_eq!(kpi.avg_utilization, 0.0);
        assert_eq!(kpi.lower_bound, Some(0.0));
        assert!(kpi.bound_ratio().is_none());
    }
}
