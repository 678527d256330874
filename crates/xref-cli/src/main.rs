//! compliance-xref CLI
//!
//! Checks that benchmark and control YAML trees reference each other
//! consistently. Intended to gate CI: exits `1` when a benchmark points at a
//! control or child benchmark that does not exist.

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use colored::Colorize;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::debug;
use xref_core::init_tracing;

/// Exit code for configuration, walk, read or parse failures
const EXIT_FATAL: i32 = 2;

#[derive(Parser)]
#[command(name = "compliance-xref")]
#[command(about = "Cross-reference checker for compliance benchmark and control YAML trees")]
#[command(version = xref_core::VERSION)]
#[command(
    long_about = "compliance-xref walks a benchmark tree and a control tree and reports\n\
benchmarks that reference undefined controls or child benchmarks, and controls\n\
that no benchmark references.\n\
\n\
Exit codes: 0 = no blocking issues, 1 = missing controls or children, 2 = fatal error.\n\
\n\
Examples:\n  \
compliance-xref                                   # Check using BENCHMARKS_PATH / CONTROLS_PATH\n  \
compliance-xref check --benchmarks b --controls c # Check explicit roots\n  \
compliance-xref compare --format json             # Flat control-id comparison as JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Root directory of benchmark YAML files
    #[arg(long, global = true, env = "BENCHMARKS_PATH", value_name = "DIR")]
    benchmarks: Option<PathBuf>,

    /// Root directory of control YAML files
    #[arg(long, global = true, env = "CONTROLS_PATH", value_name = "DIR")]
    controls: Option<PathBuf>,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        default_value = "human",
        help = "Output format for the report"
    )]
    format: OutputFormat,

    /// Directory names to skip while walking (can be used multiple times)
    #[arg(long, global = true, value_name = "NAME")]
    exclude: Vec<String>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report missing controls, missing child benchmarks and orphaned controls (default)
    Check,

    /// Compare the flat lists of control ids in benchmarks and in control files
    Compare,

    /// Show version information
    #[command(alias = "ver")]
    Version {
        /// Show detailed version information
        #[arg(long, help = "Show detailed version and build information")]
        detailed: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    /// Human-readable sections with colors
    Human,
    /// JSON document for programmatic consumption
    Json,
    /// GitHub Actions workflow commands
    Github,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    let use_colors =
        !cli.no_color && std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
    colored::control::set_override(use_colors);

    // Verbosity only applies when RUST_LOG is not set explicitly
    if std::env::var_os("RUST_LOG").is_none() {
        // SAFETY: still single-threaded, nothing else reads the environment yet
        unsafe {
            std::env::set_var("RUST_LOG", log_filter(cli.verbose));
        }
    }
    init_tracing();

    let code = match run_command(cli, use_colors) {
        Ok(code) => code,
        Err(e) => {
            debug!("Run aborted: {:?}", e);
            eprintln!("{} {:#}", "error:".red().bold(), e);
            EXIT_FATAL
        }
    };
    std::process::exit(code);
}

/// `RUST_LOG` directive for a `-v` count, covering both crates of the tool
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "xref_core=warn,xref_cli=warn",
        1 => "xref_core=info,xref_cli=info",
        2 => "xref_core=debug,xref_cli=debug",
        _ => "xref_core=trace,xref_cli=trace",
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli, use_colors: bool) -> anyhow::Result<i32> {
    let formatter = output::ReportFormatter::new(cli.format, use_colors);

    match cli.command {
        Some(Commands::Check) | None => {
            let config = commands::resolve_config(cli.benchmarks, cli.controls, cli.exclude)?;
            commands::check_command(&config, &formatter)
        }
        Some(Commands::Compare) => {
            let config = commands::resolve_config(cli.benchmarks, cli.controls, cli.exclude)?;
            commands::compare_command(&config, &formatter)
        }
        Some(Commands::Version { detailed }) => {
            commands::version_command(detailed);
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn test_log_filter_targets_both_crates() {
        assert_eq!(log_filter(0), "xref_core=warn,xref_cli=warn");
        assert_eq!(log_filter(1), "xref_core=info,xref_cli=info");
        assert_eq!(log_filter(2), "xref_core=debug,xref_cli=debug");
        assert_eq!(log_filter(7), "xref_core=trace,xref_cli=trace");

        for verbose in 0..=3 {
            let filter = log_filter(verbose);
            assert!(!filter.contains("xref="));
            assert!(EnvFilter::try_new(filter).is_ok());
        }
    }
}
