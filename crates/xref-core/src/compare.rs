//! Flat comparison of control ids
//!
//! Ignores the benchmark hierarchy and compares the set of control ids
//! declared by any benchmark file with the set of control files. Informational
//! only: it never fails a run.

use crate::model::LoadedBenchmark;
use serde::Serialize;
use std::collections::BTreeSet;

/// Both directions of the symmetric difference, sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlatComparison {
    /// Declared by a benchmark, no control file defines it
    pub only_in_benchmarks: Vec<String>,
    /// Defined by a control file, no benchmark declares it
    pub only_in_controls: Vec<String>,
}

impl FlatComparison {
    pub fn is_empty(&self) -> bool {
        self.only_in_benchmarks.is_empty() && self.only_in_controls.is_empty()
    }
}

/// Compare control ids declared by `benchmarks` (every file, duplicates
/// included) against `controls`
pub fn compare_controls(benchmarks: &[LoadedBenchmark], controls: &[String]) -> FlatComparison {
    let declared: BTreeSet<&str> = benchmarks
        .iter()
        .flat_map(|loaded| loaded.benchmark.controls.iter())
        .map(String::as_str)
        .collect();
    let defined: BTreeSet<&str> = controls.iter().map(String::as_str).collect();

    FlatComparison {
        only_in_benchmarks: declared
            .difference(&defined)
            .map(|id| id.to_string())
            .collect(),
        only_in_controls: defined
            .difference(&declared)
            .map(|id| id.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Benchmark;
    use std::path::PathBuf;

    fn loaded(id: &str, controls: &[&str]) -> LoadedBenchmark {
        LoadedBenchmark {
            path: PathBuf::from(format!("{id}.yaml")),
            benchmark: Benchmark {
                id: id.to_string(),
                controls: controls.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_symmetric_difference() {
        let benchmarks = vec![loaded("a", &["c2", "c1"]), loaded("b", &["c4", "c2"])];
        let controls = vec!["c3".to_string(), "c1".to_string(), "c2".to_string()];

        let result = compare_controls(&benchmarks, &controls);

        assert_eq!(result.only_in_benchmarks, vec!["c4"]);
        assert_eq!(result.only_in_controls, vec!["c3"]);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_duplicate_benchmark_ids_still_contribute() {
        // both files share an id; the flat comparison reads them all
        let benchmarks = vec![loaded("dup", &["c1"]), loaded("dup", &["c2"])];
        let controls = vec!["c1".to_string(), "c2".to_string()];

        assert!(compare_controls(&benchmarks, &controls).is_empty());
    }
}
