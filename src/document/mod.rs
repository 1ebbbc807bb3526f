//! JSON documents consumed and produced around the scheduler.
//!
//! - [`GraphDocument`]: the task graph input (`{"tasks": [...]}`).
//! - [`MachineTimelines`]: the schedule output, one `core_<n>` timeline per
//!   machine.

mod graph;
mod timeline;

pub use graph::GraphDocument;
pub use timeline::{machine_label, parse_machine_label, MachineTimelines, TimelineEntry};
