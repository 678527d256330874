//! Output formatting and reporting
//!
//! Renders check and compare results as coloured human text, JSON, or
//! GitHub Actions workflow commands.

use colored::*;
use std::fmt::Write as _;
use xref_core::{BenchmarkIndex, CheckReport, FlatComparison, MissingReference};

use crate::OutputFormat;

/// Output formatter for different formats
pub struct ReportFormatter {
    format: OutputFormat,
    use_colors: bool,
}

impl ReportFormatter {
    pub fn new(format: OutputFormat, use_colors: bool) -> Self {
        Self { format, use_colors }
    }

    /// Render a cross-reference report.
    ///
    /// `benchmarks` is used to point GitHub annotations at the file that
    /// holds the broken reference.
    pub fn render_check(
        &self,
        report: &CheckReport,
        benchmarks: &BenchmarkIndex,
    ) -> serde_json::Result<String> {
        match self.format {
            OutputFormat::Human => Ok(self.check_human(report)),
            OutputFormat::Json => check_json(report).map(|json| json + "\n"),
            OutputFormat::Github => Ok(check_github(report, benchmarks)),
        }
    }

    /// Render a flat comparison
    pub fn render_compare(&self, comparison: &FlatComparison) -> serde_json::Result<String> {
        match self.format {
            OutputFormat::Human => Ok(self.compare_human(comparison)),
            OutputFormat::Json => {
                serde_json::to_string_pretty(comparison).map(|json| json + "\n")
            }
            OutputFormat::Github => Ok(compare_github(comparison)),
        }
    }

    fn check_human(&self, report: &CheckReport) -> String {
        let mut out = String::new();

        self.section(
            &mut out,
            "Controls referenced by benchmarks but not defined:",
            report
                .missing_controls
                .iter()
                .map(|m| self.added_reference(m)),
        );
        self.section(
            &mut out,
            "Child benchmarks referenced but not defined:",
            report
                .missing_children
                .iter()
                .map(|m| self.added_reference(m)),
        );
        self.section(
            &mut out,
            "Controls defined but not referenced by any benchmark:",
            report.orphaned_controls.iter().map(|id| self.removed(id)),
        );

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.bold("Summary:"));
        let _ = writeln!(out, "  Benchmarks checked: {}", report.benchmarks_checked);
        let _ = writeln!(out, "  Controls defined: {}", report.controls_known);
        let _ = writeln!(
            out,
            "  Missing controls: {}",
            self.count(report.missing_controls.len(), Severity::Error)
        );
        let _ = writeln!(
            out,
            "  Missing children: {}",
            self.count(report.missing_children.len(), Severity::Error)
        );
        let _ = writeln!(
            out,
            "  Orphaned controls: {}",
            self.count(report.orphaned_controls.len(), Severity::Warning)
        );

        let verdict = if report.is_blocking() {
            self.paint("FAILED: benchmarks reference undefined ids", Severity::Error)
        } else {
            self.paint("OK: no blocking issues", Severity::Ok)
        };
        let _ = writeln!(out, "{verdict}");

        out
    }

    fn compare_human(&self, comparison: &FlatComparison) -> String {
        let mut out = String::new();

        self.section(
            &mut out,
            "Controls in benchmarks but not in controls:",
            comparison
                .only_in_benchmarks
                .iter()
                .map(|id| self.added(id)),
        );
        self.section(
            &mut out,
            "Controls in controls but not in benchmarks:",
            comparison.only_in_controls.iter().map(|id| self.removed(id)),
        );

        out
    }

    fn section(&self, out: &mut String, title: &str, lines: impl Iterator<Item = String>) {
        let _ = writeln!(out, "{}", self.bold(title));
        let mut empty = true;
        for line in lines {
            empty = false;
            let _ = writeln!(out, "{line}");
        }
        if empty {
            let _ = writeln!(out, "   {}", self.dimmed("(none)"));
        }
    }

    fn added_reference(&self, missing: &MissingReference) -> String {
        format!(
            "{}{} {}",
            self.paint(" + ", Severity::Ok),
            missing.target,
            self.dimmed(&format!("(benchmark {})", missing.benchmark))
        )
    }

    fn added(&self, id: &str) -> String {
        format!("{}{}", self.paint(" + ", Severity::Ok), id)
    }

    fn removed(&self, id: &str) -> String {
        format!("{}{}", self.paint(" - ", Severity::Error), id)
    }

    fn count(&self, n: usize, severity: Severity) -> String {
        if n == 0 {
            n.to_string()
        } else {
            self.paint(&n.to_string(), severity)
        }
    }

    fn paint(&self, text: &str, severity: Severity) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        match severity {
            Severity::Error => text.red().to_string(),
            Severity::Warning => text.yellow().to_string(),
            Severity::Ok => text.green().to_string(),
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dimmed(&self, text: &str) -> String {
        if self.use_colors {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

#[derive(Clone, Copy)]
enum Severity {
    Error,
    Warning,
    Ok,
}

fn check_json(report: &CheckReport) -> serde_json::Result<String> {
    let result = serde_json::json!({
        "missing_controls": report.missing_controls,
        "missing_children": report.missing_children,
        "orphaned_controls": report.orphaned_controls,
        "summary": {
            "benchmarks": report.benchmarks_checked,
            "controls": report.controls_known,
            "missing_controls": report.missing_controls.len(),
            "missing_children": report.missing_children.len(),
            "orphaned_controls": report.orphaned_controls.len(),
            "blocking": report.is_blocking()
        }
    });
    serde_json::to_string_pretty(&result)
}

fn check_github(report: &CheckReport, benchmarks: &BenchmarkIndex) -> String {
    let mut out = String::new();

    let location = |benchmark: &str| {
        benchmarks
            .source_of(benchmark)
            .filter(|path| !path.as_os_str().is_empty())
            .map(|path| {
                let file = path.display().to_string();
                format!("file={},", escape_property(&file))
            })
            .unwrap_or_default()
    };

    for missing in &report.missing_controls {
        let message = format!(
            "Benchmark '{}' references undefined control '{}'",
            missing.benchmark, missing.target
        );
        let _ = writeln!(
            out,
            "::error {}title=Missing control::{}",
            location(&missing.benchmark),
            escape_data(&message)
        );
    }
    for missing in &report.missing_children {
        let message = format!(
            "Benchmark '{}' references undefined child benchmark '{}'",
            missing.benchmark, missing.target
        );
        let _ = writeln!(
            out,
            "::error {}title=Missing child benchmark::{}",
            location(&missing.benchmark),
            escape_data(&message)
        );
    }
    for orphan in &report.orphaned_controls {
        let message = format!("Control '{orphan}' is not referenced by any benchmark");
        let _ = writeln!(
            out,
            "::warning title=Orphaned control::{}",
            escape_data(&message)
        );
    }

    out
}

fn compare_github(comparison: &FlatComparison) -> String {
    let mut out = String::new();
    for id in &comparison.only_in_benchmarks {
        let message = format!("Control '{id}' is in benchmarks but not in controls");
        let _ = writeln!(out, "::notice::{}", escape_data(&message));
    }
    for id in &comparison.only_in_controls {
        let message = format!("Control '{id}' is in controls but not in benchmarks");
        let _ = writeln!(out, "::notice::{}", escape_data(&message));
    }
    out
}

/// Escape the message part of a workflow command
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a `key=value` property of a workflow command
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
