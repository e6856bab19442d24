mod cli;
mod config;
mod core;
mod error;
mod models;
mod output;
mod utils;

use crate::cli::perf::PerfArgs;
use crate::cli::scan_options::ScanOptionsArgs;
use crate::config::{load_config, Config, Overrides};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "axereport")]
#[command(about = "Accessibility and performance report aggregation for end-to-end test suites")]
#[command(version = core::version())]
struct Cli {
    #[arg(long, global = true, value_name = "PATH_TO_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides build_dir from the config file
    #[arg(long, global = true, value_name = "DIR")]
    build_dir: Option<PathBuf>,

    /// Overrides accessibility.reports_dir from the config file
    #[arg(long, global = true, value_name = "DIR")]
    reports_dir: Option<PathBuf>,

    /// Print (or suppress) the per-scan console table
    #[arg(long, global = true)]
    console: Option<bool>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default axereport.toml
    Init,
    /// Store one accessibility scan as a per-test report
    Record {
        /// axe results JSON (`{ "url"?, "violations": [...] }`)
        #[arg(short, long, value_name = "AXE_RESULTS")]
        input: PathBuf,

        #[arg(short, long)]
        url: Option<String>,

        #[arg(long)]
        fail_on_violations: bool,
    },
    /// Merge per-test reports into accessibility-report.json and .md
    Merge {
        #[arg(short, long, value_name = "REPORT_FILE_NAME")]
        output: Option<PathBuf>,

        #[arg(long)]
        no_timestamp: bool,

        #[arg(long)]
        sarif: bool,
    },
    /// Render a merged report as md, json or sarif
    Show {
        report: PathBuf,

        #[arg(short, long)]
        format: Option<String>,
    },
    /// Print the resolved axe scan options as JSON
    ScanOptions(ScanOptionsArgs),
    /// Check a Lighthouse result against the configured thresholds
    Perf(PerfArgs),
    /// Remove the build directory
    Clean,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(overrides: Overrides, config_path: Option<PathBuf>) -> Config {
    match load_config(overrides, config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config;
    let overrides = Overrides {
        build_dir: cli.build_dir,
        reports_dir: cli.reports_dir,
        console: cli.console,
    };
    let config = || resolve_config(overrides.clone(), config_path.clone());

    match cli.command {
        Commands::Init => cli::init::handle_init_command(config_path.clone()),
        Commands::Record {
            input,
            url,
            fail_on_violations,
        } => cli::record::handle_record_command(&config(), input, url, fail_on_violations),
        Commands::Merge {
            output,
            no_timestamp,
            sarif,
        } => cli::merge::handle_merge_command(&config(), output, no_timestamp, sarif),
        Commands::Show { report, format } => cli::show::handle_show_command(&report, format),
        Commands::ScanOptions(args) => {
            cli::scan_options::handle_scan_options_command(&config(), args)
        }
        Commands::Perf(args) => cli::perf::handle_perf_command(&config(), args),
        Commands::Clean => cli::clean::handle_clean_command(&config()),
    }
}
