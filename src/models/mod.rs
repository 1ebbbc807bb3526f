//! Scheduling domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `Task` | Unit of work with a duration and dependency ids |
//! | `TaskGraph` | Immutable precedence DAG over tasks (index arena) |
//! | `Assignment` | One task placed on one machine over `[start, finish)` |
//! | `Schedule` | All assignments of a run plus final machine ready times |

mod graph;
mod schedule;
mod task;

pub use graph::TaskGraph;
pub use schedule::{Assignment, Schedule};
pub use task::Task;
