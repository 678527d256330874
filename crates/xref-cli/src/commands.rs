//! CLI command implementations

use anyhow::Context;
use std::path::PathBuf;
use tracing::{debug, info};
use xref_core::{
    CheckConfig, LoadedTree, check, compare_controls, load_benchmark_files, load_controls,
};

use crate::output::ReportFormatter;

/// Build and validate the run configuration from flags/environment
pub fn resolve_config(
    benchmarks: Option<PathBuf>,
    controls: Option<PathBuf>,
    exclude: Vec<String>,
) -> anyhow::Result<CheckConfig> {
    let config = CheckConfig::resolve(benchmarks, controls)?.with_exclude_dirs(exclude);
    config.validate()?;
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

/// Check command implementation. Returns the process exit code.
pub fn check_command(config: &CheckConfig, formatter: &ReportFormatter) -> anyhow::Result<i32> {
    info!(
        "Checking benchmarks in {} against controls in {}",
        config.benchmarks_root.display(),
        config.controls_root.display()
    );

    let tree = LoadedTree::load(config).context("Failed to load benchmark and control trees")?;
    let report = check(&tree.benchmarks, &tree.controls);

    let rendered = formatter
        .render_check(&report, &tree.benchmarks)
        .context("Failed to render report")?;
    print!("{rendered}");

    Ok(report.exit_code())
}

/// Compare command implementation. Informational: exits `0` once loading succeeds.
pub fn compare_command(config: &CheckConfig, formatter: &ReportFormatter) -> anyhow::Result<i32> {
    let benchmarks = load_benchmark_files(&config.benchmarks_root, &config.exclude_dirs)
        .with_context(|| {
            format!(
                "Failed to load benchmarks from {}",
                config.benchmarks_root.display()
            )
        })?;
    let controls = load_controls(&config.controls_root, &config.exclude_dirs).with_context(|| {
        format!(
            "Failed to load controls from {}",
            config.controls_root.display()
        )
    })?;

    let comparison = compare_controls(&benchmarks, &controls);
    let rendered = formatter
        .render_compare(&comparison)
        .context("Failed to render comparison")?;
    print!("{rendered}");

    Ok(0)
}

pub fn version_command(detailed: bool) {
    if detailed {
        println!("compliance-xref {}", xref_core::VERSION);
        println!("Build information:");
        println!("  Target: {}", std::env::consts::ARCH);
        println!("  OS: {}", std::env::consts::OS);
    } else {
        println!("{}", xref_core::VERSION);
    }
}
