//! Cross-reference checks between benchmarks and controls

use crate::model::BenchmarkIndex;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// A reference from a benchmark to an id that does not exist
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MissingReference {
    /// Benchmark holding the reference
    pub benchmark: String,
    /// The id that could not be resolved
    pub target: String,
}

impl MissingReference {
    fn new(benchmark: &str, target: &str) -> Self {
        Self {
            benchmark: benchmark.to_string(),
            target: target.to_string(),
        }
    }
}

/// Findings of a cross-reference check.
///
/// Missing references are listed once per occurrence, grouped by benchmark
/// in identifier order and kept in declaration order within a benchmark.
/// Orphaned controls are sorted and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub missing_controls: Vec<MissingReference>,
    pub missing_children: Vec<MissingReference>,
    pub orphaned_controls: Vec<String>,
    pub benchmarks_checked: usize,
    pub controls_known: usize,
}

impl CheckReport {
    /// Missing controls or children block CI; orphans do not
    pub fn is_blocking(&self) -> bool {
        !self.missing_controls.is_empty() || !self.missing_children.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.is_blocking() && self.orphaned_controls.is_empty()
    }

    /// Process exit code for this report: `1` when blocking, `0` otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_blocking() { 1 } else { 0 }
    }
}

/// Compare the benchmark index against the list of defined control ids
pub fn check(benchmarks: &BenchmarkIndex, controls: &[String]) -> CheckReport {
    let known_controls: BTreeSet<&str> = controls.iter().map(String::as_str).collect();
    let mut referenced_controls: BTreeSet<&str> = BTreeSet::new();

    let mut report = CheckReport {
        benchmarks_checked: benchmarks.len(),
        controls_known: known_controls.len(),
        ..Default::default()
    };

    for (id, benchmark) in benchmarks.iter() {
        for control in &benchmark.controls {
            referenced_controls.insert(control.as_str());
            if !known_controls.contains(control.as_str()) {
                report
                    .missing_controls
                    .push(MissingReference::new(id, control));
            }
        }

        for child in &benchmark.children {
            if !benchmarks.contains(child) {
                report
                    .missing_children
                    .push(MissingReference::new(id, child));
            }
        }
    }

    report.orphaned_controls = known_controls
        .difference(&referenced_controls)
        .map(|id| id.to_string())
        .collect();

    debug!(
        "Cross-reference check: {} missing controls, {} missing children, {} orphaned controls",
        report.missing_controls.len(),
        report.missing_children.len(),
        report.orphaned_controls.len()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Benchmark;

    fn benchmark(id: &str, children: &[&str], controls: &[&str]) -> Benchmark {
        Benchmark {
            id: id.to_string(),
            children: children.iter().map(|s| s.to_string()).collect(),
            controls: controls.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_control_blocks() {
        let index: BenchmarkIndex = vec![benchmark("A", &[], &["C1", "C2"])].into_iter().collect();

        let report = check(&index, &ids(&["C1"]));

        assert_eq!(
            report.missing_controls,
            vec![MissingReference::new("A", "C2")]
        );
        assert!(report.missing_children.is_empty());
        assert!(report.orphaned_controls.is_empty());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_missing_child_blocks() {
        let index: BenchmarkIndex = vec![benchmark("A", &["B"], &[])].into_iter().collect();

        let report = check(&index, &[]);

        assert_eq!(
            report.missing_children,
            vec![MissingReference::new("A", "B")]
        );
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_orphan_alone_does_not_block() {
        let index: BenchmarkIndex = vec![benchmark("A", &[], &["C1"])].into_iter().collect();

        let report = check(&index, &ids(&["C1", "C3"]));

        assert_eq!(report.orphaned_controls, vec!["C3"]);
        assert!(!report.is_blocking());
        assert!(!report.is_clean());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_missing_control_reported_per_occurrence() {
        let index: BenchmarkIndex = vec![
            benchmark("A", &[], &["X"]),
            benchmark("B", &[], &["X", "Y"]),
        ]
        .into_iter()
        .collect();

        let report = check(&index, &[]);

        assert_eq!(
            report.missing_controls,
            vec![
                MissingReference::new("A", "X"),
                MissingReference::new("B", "X"),
                MissingReference::new("B", "Y"),
            ]
        );
    }

    #[test]
    fn test_referenced_control_never_orphaned() {
        let index: BenchmarkIndex = vec![
            benchmark("root", &["leaf"], &[]),
            benchmark("leaf", &[], &["C1", "C2"]),
        ]
        .into_iter()
        .collect();

        let report = check(&index, &ids(&["C2", "C1", "C1"]));

        assert!(report.is_clean());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.controls_known, 2);
        assert_eq!(report.benchmarks_checked, 2);
    }

    #[test]
    fn test_orphans_sorted_and_unique() {
        let index = BenchmarkIndex::new();

        let report = check(&index, &ids(&["zeta", "alpha", "zeta", "mid"]));

        assert_eq!(report.orphaned_controls, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_child_resolved_against_indexed_ids() {
        let index: BenchmarkIndex = vec![
            benchmark("", &[], &[]),
            benchmark("parent", &["", "child"], &[]),
            benchmark("child", &[], &[]),
        ]
        .into_iter()
        .collect();

        let report = check(&index, &[]);

        // empty ids are never indexed, so a reference to "" is missing
        assert_eq!(
            report.missing_children,
            vec![MissingReference::new("parent", "")]
        );
    }
}
