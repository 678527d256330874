//! Compliance cross-reference core
//!
//! Loads benchmark and control YAML trees and checks the references between
//! them: controls a benchmark claims but nobody defines, child benchmarks
//! that do not exist, and controls no benchmark references.

pub mod checker;
pub mod compare;
pub mod config;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod model;
pub mod result;

// Re-export commonly used types
pub use checker::{CheckReport, MissingReference, check};
pub use compare::{FlatComparison, compare_controls};
pub use config::{BENCHMARKS_PATH_ENV, CONTROLS_PATH_ENV, CheckConfig};
pub use discovery::YamlDiscovery;
pub use error::{DocumentKind, ErrorKind, XrefError};
pub use loader::{
    LoadedTree, load_benchmark_files, load_benchmarks, load_control_files, load_controls,
};
pub use model::{
    Benchmark, BenchmarkIndex, Control, IdCollision, LoadedBenchmark, LoadedControl,
};
pub use result::Result;

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the report.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("xref_core=warn,xref_cli=warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
