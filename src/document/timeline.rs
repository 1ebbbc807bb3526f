//! Per-machine timelines: the schedule output document.
//!
//! ```json
//! {
//!   "core_0": [{"task": "A", "start_time": 0.0}, {"task": "C", "start_time": 2.0}],
//!   "core_1": [{"task": "B", "start_time": 2.0}]
//! }
//! ```
//!
//! One key per machine, in machine order, even when a machine is idle.
//! Entries are sorted by start time; equal start times keep commit order.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, ScheduleError};
use crate::models::Schedule;

const MACHINE_LABEL_PREFIX: &str = "core_";

/// One task start on a machine timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub task: String,
    pub start_time: f64,
}

/// A schedule grouped into one ordered timeline per machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MachineTimelines {
    timelines: Vec<Vec<TimelineEntry>>,
}

/// Label of machine `index` in the output document.
pub fn machine_label(index: usize) -> String {
    format!("{MACHINE_LABEL_PREFIX}{index}")
}

/// Parses a `core_<n>` label back to its machine index.
pub fn parse_machine_label(label: &str) -> Option<usize> {
    let digits = label.strip_prefix(MACHINE_LABEL_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl MachineTimelines {
    /// Groups `schedule` by machine, each timeline ascending by start time.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let mut timelines = vec![Vec::new(); schedule.num_machines()];
        for a in &schedule.assignments {
            if let Some(timeline) = timelines.get_mut(a.machine) {
                timeline.push(TimelineEntry {
                    task: a.task_id.clone(),
                    start_time: a.start,
                });
            }
        }
        for timeline in &mut timelines {
            // Stable: equal starts (zero-duration tasks) keep commit order.
            timeline.sort_by(|a: &TimelineEntry, b: &TimelineEntry| {
                a.start_time.total_cmp(&b.start_time)
            });
        }
        Self { timelines }
    }

    /// Number of machines.
    pub fn num_machines(&self) -> usize {
        self.timelines.len()
    }

    /// Timeline of one machine.
    pub fn machine(&self, index: usize) -> Option<&[TimelineEntry]> {
        self.timelines.get(index).map(Vec::as_slice)
    }

    /// Iterates `(machine index, timeline)` in machine order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[TimelineEntry])> {
        self.timelines
            .iter()
            .enumerate()
            .map(|(i, t)| (i, t.as_slice()))
    }

    /// Total number of entries across machines.
    pub fn task_count(&self) -> usize {
        self.timelines.iter().map(Vec::len).sum()
    }

    /// Regroups by task: `task id -> (machine, start_time)`.
    pub fn by_task(&self) -> HashMap<String, (usize, f64)> {
        self.iter()
            .flat_map(|(m, entries)| {
                entries
                    .iter()
                    .map(move |e| (e.task.clone(), (m, e.start_time)))
            })
            .collect()
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Writes the document as pretty-printed JSON.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json_string_pretty()?)?;
        Ok(())
    }

    /// Reads a document from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Builds timelines from labelled entries, as read from a document.
    ///
    /// A written document lists every machine, so the labels must be
    /// exactly `core_0..core_<len - 1>` in any order.
    pub fn from_labelled(entries: Vec<(String, Vec<TimelineEntry>)>) -> Result<Self> {
        let num_machines = entries.len();
        Self::from_labelled_with_machines(entries, num_machines)
    }

    /// Builds timelines over a known machine count.
    ///
    /// Labels outside `0..num_machines` are rejected. Machines with no
    /// label become empty timelines.
    pub fn from_labelled_with_machines(
        entries: Vec<(String, Vec<TimelineEntry>)>,
        num_machines: usize,
    ) -> Result<Self> {
        let mut timelines = vec![Vec::new(); num_machines];
        let mut seen = vec![false; num_machines];
        for (label, timeline) in entries {
            let index = parse_machine_label(&label).ok_or_else(|| {
                ScheduleError::InvalidDocument(format!(
                    "unexpected key '{label}' (expected '{MACHINE_LABEL_PREFIX}<n>')"
                ))
            })?;
            if index >= num_machines {
                return Err(ScheduleError::InvalidDocument(format!(
                    "machine '{label}' out of range for {num_machines} machine(s)"
                )));
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(ScheduleError::InvalidDocument(format!(
                    "machine '{label}' listed twice"
                )));
            }
            timelines[index] = timeline;
        }
        Ok(Self { timelines })
    }
}

impl Serialize for MachineTimelines {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.timelines.len()))?;
        for (i, timeline) in self.timelines.iter().enumerate() {
            map.serialize_entry(&machine_label(i), timeline)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MachineTimelines {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TimelinesVisitor;

        impl<'de> Visitor<'de> for TimelinesVisitor {
            type Value = MachineTimelines;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of core_<n> labels to timelines")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((label, timeline)) =
                    access.next_entry::<String, Vec<TimelineEntry>>()?
                {
                    entries.push((label, timeline));
                }
                MachineTimelines::from_labelled(entries).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_map(TimelinesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, TaskGraph};
    use crate::scheduler::min_min_schedule;

    fn diamond_schedule() -> Schedule {
        let g = TaskGraph::new(vec![
            Task::new("A", 2.0),
            Task::new("B", 3.0).with_dependency("A"),
            Task::new("C", 1.0).with_dependency("A"),
            Task::new("D", 2.0).with_dependencies(["B", "C"]),
        ])
        .unwrap();
        min_min_schedule(&g, 3).unwrap()
    }

    #[test]
    fn test_machine_labels() {
        assert_eq!(machine_label(0), "core_0");
        assert_eq!(parse_machine_label("core_12"), Some(12));
        assert_eq!(parse_machine_label("core_"), None);
        assert_eq!(parse_machine_label("core_+1"), None);
        assert_eq!(parse_machine_label("gpu_0"), None);
    }

    #[test]
    fn test_grouping_sorted_by_start() {
        let t = MachineTimelines::from_schedule(&diamond_schedule());
        assert_eq!(t.num_machines(), 3);
        assert_eq!(t.task_count(), 4);

        let m0: Vec<(&str, f64)> = t
            .machine(0)
            .unwrap()
            .iter()
            .map(|e| (e.task.as_str(), e.start_time))
            .collect();
        assert_eq!(m0, vec![("A", 0.0), ("C", 2.0), ("D", 5.0)]);
        assert_eq!(t.machine(1).unwrap().len(), 1);
        // Third machine is never used but still present.
        assert!(t.machine(2).unwrap().is_empty());
    }

    #[test]
    fn test_json_shape() {
        let t = MachineTimelines::from_schedule(&diamond_schedule());
        let value: serde_json::Value = serde_json::to_value(&t).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["core_1"][0]["task"], "B");
        assert_eq!(obj["core_1"][0]["start_time"], 2.0);
        assert_eq!(obj["core_2"], serde_json::json!([]));
    }

    #[test]
    fn test_keys_in_machine_order() {
        let t = MachineTimelines::from_schedule(&Schedule::new(12));
        let json = serde_json::to_string(&t).unwrap();
        let pos2 = json.find("\"core_2\"").unwrap();
        let pos10 = json.find("\"core_10\"").unwrap();
        assert!(pos2 < pos10);
    }

    #[test]
    fn test_document_roundtrip() {
        let s = diamond_schedule();
        let t = MachineTimelines::from_schedule(&s);
        let back = MachineTimelines::from_json_str(&t.to_json_string_pretty().unwrap()).unwrap();
        assert_eq!(back, t);

        let by_task = back.by_task();
        for a in &s.assignments {
            assert_eq!(by_task[&a.task_id], (a.machine, a.start));
        }
    }

    #[test]
    fn test_invalid_label_rejected() {
        let err = MachineTimelines::from_json_str(r#"{"gpu_0": []}"#).unwrap_err();
        assert!(matches!(err, ScheduleError::Json(_)));

        let err = MachineTimelines::from_labelled(vec![("x".into(), Vec::new())]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDocument(_)));

        let err = MachineTimelines::from_labelled(vec![
            ("core_0".into(), Vec::new()),
            ("core_0".into(), Vec::new()),
        ])
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDocument(_)));
    }

    #[test]
    fn test_out_of_range_labels_rejected() {
        // A standalone document may only use indexes below its key count.
        for json in [
            r#"{"core_18446744073709551615": []}"#,
            r#"{"core_4000000000": []}"#,
            r#"{"core_0": [], "core_2": []}"#,
        ] {
            let err = MachineTimelines::from_json_str(json).unwrap_err();
            assert!(matches!(err, ScheduleError::Json(_)), "{json}");
        }

        let err = MachineTimelines::from_labelled_with_machines(
            vec![("core_3".into(), Vec::new())],
            3,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDocument(msg) if msg.contains("core_3")));

        let err = MachineTimelines::from_labelled(vec![(
            format!("core_{}", usize::MAX),
            Vec::new(),
        )])
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDocument(_)));
    }

    #[test]
    fn test_known_machine_count_fills_gaps() {
        let entry = TimelineEntry {
            task: "A".into(),
            start_time: 0.0,
        };
        let t = MachineTimelines::from_labelled_with_machines(
            vec![("core_2".into(), vec![entry])],
            4,
        )
        .unwrap();
        assert_eq!(t.num_machines(), 4);
        assert!(t.machine(0).unwrap().is_empty());
        assert!(t.machine(3).unwrap().is_empty());
        assert_eq!(t.by_task()["A"], (2, 0.0));
    }

    #[test]
    fn test_labels_in_any_order() {
        let t = MachineTimelines::from_json_str(
            r#"{"core_1": [{"task": "B", "start_time": 1}], "core_0": []}"#,
        )
        .unwrap();
        assert_eq!(t.num_machines(), 2);
        assert_eq!(t.by_task()["B"], (1, 1.0));
    }
}
