//! arch-fitness CLI tool.
//!
//! Usage:
//! ```bash
//! arch-fitness check [OPTIONS] [PATH]
//! arch-fitness graph [PATH]
//! arch-fitness list-rules [PATH]
//! arch-fitness init
//! ```
//!
//! Exit status: `0` when every check passed, `1` when a check reported
//! violations at or above the fail threshold or could not run, `2` when the
//! configuration or policy is invalid.

use std::path::PathBuf;
use std::process::ExitCode;

use arch_fitness_core::{PolicyError, Severity};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Architecture conformance checks for layered TypeScript projects
#[derive(Parser)]
#[command(name = "arch-fitness")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fitness checks
    Check {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run these checks (comma-separated)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,

        /// Skip these checks (comma-separated)
        #[arg(long, value_delimiter = ',')]
        skip: Vec<String>,

        /// Lowest severity that fails the run (overrides `fail_on`)
        #[arg(long, value_parser = parse_severity)]
        fail_on: Option<Severity>,
    },

    /// Print the module graph
    Graph {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: GraphFormat,
    },

    /// List the assembled rules and the available checks
    ListRules {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Grouped, human-readable report.
    #[default]
    Text,
    /// JSON run report.
    Json,
    /// One line per violation.
    Compact,
}

/// Output format for the module graph.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum GraphFormat {
    /// Nodes then edges, one per line.
    #[default]
    Text,
    /// JSON nodes and edges.
    Json,
}

fn parse_severity(value: &str) -> Result<Severity, String> {
    Severity::parse(value).ok_or_else(|| format!("unknown severity `{value}` (expected error, warn or info)"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Check {
            path,
            format,
            only,
            skip,
            fail_on,
        } => {
            let source = config_resolver::resolve(&path, config);
            let options = commands::check::Options {
                format,
                only,
                skip,
                fail_on,
            };
            commands::check::run(&path, &options, &source).map(|passed| {
                if passed {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(1)
                }
            })
        }
        Commands::Graph { path, format } => {
            let source = config_resolver::resolve(&path, config);
            commands::graph::run(&path, format, &source).map(|()| ExitCode::SUCCESS)
        }
        Commands::ListRules { path } => {
            let source = config_resolver::resolve(&path, config);
            commands::list_rules::run(&path, &source).map(|()| ExitCode::SUCCESS)
        }
        Commands::Init { force } => commands::init::run(force).map(|()| ExitCode::SUCCESS),
    };

    result.unwrap_or_else(report_error)
}

/// Prints a fatal error. Policy errors get a rich diagnostic and exit 2.
fn report_error(err: anyhow::Error) -> ExitCode {
    match err.downcast::<PolicyError>() {
        Ok(policy) => {
            eprintln!("{:?}", miette::Report::new(policy));
            ExitCode::from(2)
        }
        Err(other) => {
            eprintln!("Error: {other:#}");
            ExitCode::from(1)
        }
    }
}
