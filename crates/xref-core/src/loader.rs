//! Benchmark and control loaders
//!
//! Both loaders walk their root with [`YamlDiscovery`], read each file and
//! deserialize it. The first walk, read or parse failure is returned to the
//! caller with the offending path attached; nothing is partially loaded.

use crate::config::CheckConfig;
use crate::discovery::YamlDiscovery;
use crate::error::DocumentKind;
use crate::model::{Benchmark, BenchmarkIndex, Control, LoadedBenchmark, LoadedControl};
use crate::{Result, XrefError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Parse every benchmark file below `root`, in walk order, without
/// de-duplicating identifiers.
pub fn load_benchmark_files(root: &Path, exclude_dirs: &[String]) -> Result<Vec<LoadedBenchmark>> {
    let files = YamlDiscovery::new(root)
        .with_exclude_dirs(exclude_dirs)
        .discover()?;

    files
        .into_iter()
        .map(|path| {
            let benchmark: Benchmark = parse_document(&path, DocumentKind::Benchmark)?;
            Ok(LoadedBenchmark { path, benchmark })
        })
        .collect()
}

/// Load benchmarks below `root` into an index keyed by identifier.
///
/// Files with an empty `ID` are dropped. When two files share an `ID` the
/// one visited later replaces the earlier one; each such collision is logged
/// and kept on the index.
pub fn load_benchmarks(root: &Path, exclude_dirs: &[String]) -> Result<BenchmarkIndex> {
    let index: BenchmarkIndex = load_benchmark_files(root, exclude_dirs)?
        .into_iter()
        .collect();

    for collision in index.collisions() {
        warn!(
            "Benchmark '{}' in {} overrides the definition in {}",
            collision.id,
            collision.winner.display(),
            collision.overwritten.display()
        );
    }
    if index.is_empty() {
        warn!("No benchmarks with an ID found in {}", root.display());
    }
    if index.skipped_empty_id() > 0 {
        debug!(
            "Skipped {} benchmark files without an ID",
            index.skipped_empty_id()
        );
    }
    info!(
        "Loaded {} benchmarks from {} files in {}",
        index.len(),
        index.files_read(),
        root.display()
    );

    Ok(index)
}

/// Parse every control file below `root`, in walk order, keeping controls
/// with an empty identifier.
pub fn load_control_files(root: &Path, exclude_dirs: &[String]) -> Result<Vec<LoadedControl>> {
    let files = YamlDiscovery::new(root)
        .with_exclude_dirs(exclude_dirs)
        .discover()?;

    files
        .into_iter()
        .map(|path| {
            let control: Control = parse_document(&path, DocumentKind::Control)?;
            Ok(LoadedControl { path, control })
        })
        .collect()
}

/// Load the identifiers of all controls below `root`, in walk order.
/// Empty identifiers are left out.
pub fn load_controls(root: &Path, exclude_dirs: &[String]) -> Result<Vec<String>> {
    let ids: Vec<String> = load_control_files(root, exclude_dirs)?
        .into_iter()
        .map(|loaded| loaded.control.id)
        .filter(|id| !id.is_empty())
        .collect();

    info!("Loaded {} controls from {}", ids.len(), root.display());
    Ok(ids)
}

/// Everything the checker needs, loaded according to a [`CheckConfig`]
#[derive(Debug, Clone)]
pub struct LoadedTree {
    pub benchmarks: BenchmarkIndex,
    pub controls: Vec<String>,
}

impl LoadedTree {
    /// Load benchmarks, then controls
    pub fn load(config: &CheckConfig) -> Result<Self> {
        let benchmarks = load_benchmarks(&config.benchmarks_root, &config.exclude_dirs)?;
        let controls = load_controls(&config.controls_root, &config.exclude_dirs)?;
        Ok(Self {
            benchmarks,
            controls,
        })
    }
}

/// Read and deserialize one YAML document.
///
/// A file that is empty or holds only comments/whitespace yields the
/// default value, the same as a document with every key absent. Only the
/// first document of a multi-document stream is read; a null first document
/// also yields the default.
fn parse_document<T>(path: &Path, document: DocumentKind) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    debug!("Parsing {} {}", document, path.display());

    let content = fs::read_to_string(path).map_err(|e| XrefError::io_error(path, e))?;
    if is_blank_document(&content) {
        return Ok(T::default());
    }

    let Some(first) = serde_yaml::Deserializer::from_str(&content).next() else {
        return Ok(T::default());
    };
    Option::<T>::deserialize(first)
        .map(Option::unwrap_or_default)
        .map_err(|e| XrefError::yaml_error(document, path, e))
}

fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}
