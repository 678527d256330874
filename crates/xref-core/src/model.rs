//! Benchmark and control documents as they appear on disk

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Treat an explicit `null`/`~` the same as an absent key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A benchmark: a named grouping of child benchmarks and controls.
///
/// Field names follow the YAML keys used in the content repository
/// (`ID`, `Title`, `Children`, ...). Every field is optional in the
/// document; absent or null keys take their default value and unknown keys
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Benchmark {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub reference_code: Option<String>,
    pub connector: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub children: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub managed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub auto_assign: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub baseline: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub controls: Vec<String>,
}

/// A control. Only the identifier matters for cross-referencing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Control {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: String,
}

/// A benchmark together with the file it was read from
#[derive(Debug, Clone)]
pub struct LoadedBenchmark {
    pub path: PathBuf,
    pub benchmark: Benchmark,
}

/// A control together with the file it was read from
#[derive(Debug, Clone)]
pub struct LoadedControl {
    pub path: PathBuf,
    pub control: Control,
}

/// Two benchmark files declared the same identifier; the later one won
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdCollision {
    pub id: String,
    pub overwritten: PathBuf,
    pub winner: PathBuf,
}

/// Benchmarks keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct BenchmarkIndex {
    benchmarks: BTreeMap<String, Benchmark>,
    sources: BTreeMap<String, PathBuf>,
    collisions: Vec<IdCollision>,
    files_read: usize,
    skipped_empty_id: usize,
}

impl BenchmarkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index one loaded benchmark.
    ///
    /// Records with an empty identifier are counted and dropped. A repeated
    /// identifier replaces the earlier record and is remembered as a collision.
    pub fn insert(&mut self, loaded: LoadedBenchmark) {
        self.files_read += 1;

        let LoadedBenchmark { path, benchmark } = loaded;
        if benchmark.id.is_empty() {
            self.skipped_empty_id += 1;
            return;
        }

        let id = benchmark.id.clone();
        if let Some(previous) = self.sources.insert(id.clone(), path.clone()) {
            self.collisions.push(IdCollision {
                id: id.clone(),
                overwritten: previous,
                winner: path,
            });
        }
        self.benchmarks.insert(id, benchmark);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.benchmarks.contains_key(id)
    }

    /// Benchmarks in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Benchmark)> {
        self.benchmarks.iter()
    }

    /// File the indexed benchmark was read from
    pub fn source_of(&self, id: &str) -> Option<&PathBuf> {
        self.sources.get(id)
    }

    pub fn collisions(&self) -> &[IdCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    pub fn files_read(&self) -> usize {
        self.files_read
    }

    pub fn skipped_empty_id(&self) -> usize {
        self.skipped_empty_id
    }
}

impl FromIterator<LoadedBenchmark> for BenchmarkIndex {
    fn from_iter<I: IntoIterator<Item = LoadedBenchmark>>(iter: I) -> Self {
        let mut index = BenchmarkIndex::new();
        for loaded in iter {
            index.insert(loaded);
        }
        index
    }
}

impl FromIterator<Benchmark> for BenchmarkIndex {
    fn from_iter<I: IntoIterator<Item = Benchmark>>(iter: I) -> Self {
        iter.into_iter()
            .map(|benchmark| LoadedBenchmark {
                path: PathBuf::new(),
                benchmark,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(path: &str, id: &str, title: &str) -> LoadedBenchmark {
        LoadedBenchmark {
            path: PathBuf::from(path),
            benchmark: Benchmark {
                id: id.to_string(),
                title: title.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_deserialize_full_benchmark() {
        let yaml = r#"
ID: aws_cis_v200
Title: CIS v2.0.0
ReferenceCode: "1.2"
Connector: aws
Description: Center for Internet Security benchmark
Children:
  - aws_cis_v200_1
  - aws_cis_v200_2
Tags:
  category:
    - Compliance
  plugin:
    - aws
Managed: true
Enabled: true
AutoAssign: false
Baseline: true
Controls:
  - aws_iam_root_user_no_access_keys
"#;
        let benchmark: Benchmark = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(benchmark.id, "aws_cis_v200");
        assert_eq!(benchmark.reference_code.as_deref(), Some("1.2"));
        assert_eq!(benchmark.connector.as_deref(), Some("aws"));
        assert_eq!(benchmark.children, vec!["aws_cis_v200_1", "aws_cis_v200_2"]);
        assert_eq!(benchmark.tags["category"], vec!["Compliance"]);
        assert!(benchmark.managed && benchmark.enabled && benchmark.baseline);
        assert!(!benchmark.auto_assign);
        assert_eq!(benchmark.controls, vec!["aws_iam_root_user_no_access_keys"]);
    }

    #[test]
    fn test_deserialize_sparse_benchmark_uses_defaults() {
        let benchmark: Benchmark = serde_yaml::from_str("ID: only_id\nUnknownKey: 3\n").unwrap();
        assert_eq!(benchmark.id, "only_id");
        assert!(benchmark.children.is_empty());
        assert!(benchmark.controls.is_empty());
        assert!(benchmark.reference_code.is_none());
    }

    #[test]
    fn test_null_values_take_defaults() {
        let benchmark: Benchmark = serde_yaml::from_str(
            "ID: a\nTitle: ~\nChildren: null\nControls: ~\nTags: null\nManaged: null\n",
        )
        .unwrap();
        assert_eq!(benchmark.id, "a");
        assert!(benchmark.title.is_empty());
        assert!(benchmark.children.is_empty());
        assert!(benchmark.controls.is_empty());
        assert!(benchmark.tags.is_empty());
        assert!(!benchmark.managed);

        let control: Control = serde_yaml::from_str("ID: ~\n").unwrap();
        assert!(control.id.is_empty());
    }

    #[test]
    fn test_control_ignores_other_fields() {
        let control: Control = serde_yaml::from_str(
            "ID: c1\nTitle: Root user has MFA\nQuery:\n  PrimaryTable: aws_iam_user\n",
        )
        .unwrap();
        assert_eq!(control.id, "c1");
    }

    #[test]
    fn test_index_skips_empty_ids() {
        let index: BenchmarkIndex = vec![loaded("a.yaml", "", "no id"), loaded("b.yaml", "b", "B")]
            .into_iter()
            .collect();
        assert_eq!(index.len(), 1);
        assert_eq!(index.files_read(), 2);
        assert_eq!(index.skipped_empty_id(), 1);
        assert!(index.contains("b"));
    }

    #[test]
    fn test_index_last_write_wins() {
        let index: BenchmarkIndex = vec![
            loaded("one/a.yaml", "a", "first"),
            loaded("two/a.yaml", "a", "second"),
        ]
        .into_iter()
        .collect();

        assert_eq!(index.len(), 1);
        let (_, winner) = index.iter().next().unwrap();
        assert_eq!(winner.title, "second");
        assert_eq!(index.source_of("a"), Some(&PathBuf::from("two/a.yaml")));
        assert_eq!(
            index.collisions(),
            &[IdCollision {
                id: "a".to_string(),
                overwritten: PathBuf::from("one/a.yaml"),
                winner: PathBuf::from("two/a.yaml"),
            }]
        );
    }
}
