//! Input validation for task graphs.
//!
//! The scheduler only notices a bad graph when it stalls. These checks
//! let a caller find every problem up front:
//! - Duplicate task IDs
//! - Invalid durations (negative, NaN, infinite)
//! - Dependencies on unknown tasks
//! - Self dependencies
//! - Circular dependencies (DAG validation)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::Task;
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// Duration is negative, NaN or infinite.
    InvalidDuration,
    /// A task depends on an ID that no task has.
    UnknownDependency,
    /// A task lists itself as a dependency.
    SelfDependency,
    /// Dependency graph contains a cycle.
    CyclicDependency,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates tasks before building a graph.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for task in tasks {
        if !ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
        if !task.has_valid_duration() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Task '{}' has invalid duration {}", task.id, task.duration),
            ));
        }
    }

    for task in tasks {
        for dep in &task.dependencies {
            if dep == &task.id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfDependency,
                    format!("Task '{}' depends on itself", task.id),
                ));
            } else if !ids.contains(dep.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownDependency,
                    format!("Task '{}' depends on unknown task '{}'", task.id, dep),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(tasks) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles among known tasks using DFS.
///
/// Self dependencies are reported separately and skipped here.
fn detect_cycles(tasks: &[Task]) -> Option<ValidationError> {
    // dependency → dependents
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for task in tasks {
        for dep in &task.dependencies {
            if dep != &task.id {
                adj.entry(dep.as_str()).or_default().push(task.id.as_str());
            }
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    // Declaration order keeps the reported task stable.
    for task in tasks {
        let node = task.id.as_str();
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving task '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("A", 2.0),
            Task::new("B", 3.0).with_dependency("A"),
            Task::new("C", 2.0).with_dependencies(["A", "B"]),
        ]
    }

    fn has_kind(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_tasks(&sample_tasks()).is_ok());
        assert!(validate_tasks(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_task_id() {
        let tasks = vec![Task::new("A", 1.0), Task::new("A", 2.0)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_invalid_duration() {
        let tasks = vec![Task::new("A", -2.0), Task::new("B", f64::NAN)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidDuration));
    }

    #[test]
    fn test_unknown_dependency() {
        let tasks = vec![Task::new("A", 1.0).with_dependency("NONEXISTENT")];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::UnknownDependency));
        assert!(errors[0].message.contains("NONEXISTENT"));
    }

    #[test]
    fn test_self_dependency() {
        let tasks = vec![Task::new("A", 1.0).with_dependency("A")];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::SelfDependency);
    }

    #[test]
    fn test_cyclic_dependency() {
        // A → B → C → A
        let tasks = vec![
            Task::new("A", 1.0).with_dependency("C"),
            Task::new("B", 1.0).with_dependency("A"),
            Task::new("C", 1.0).with_dependency("B"),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_two_task_cycle() {
        let tasks = vec![
            Task::new("P", 1.0).with_dependency("Q"),
            Task::new("Q", 1.0).with_dependency("P"),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("'P'"));
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![
            Task::new("A", -1.0),
            Task::new("B", 1.0).with_dependency("UNKNOWN"),
            Task::new("B", 1.0),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
