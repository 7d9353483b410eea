#![forbid(unsafe_code)]

//! `pkgr` — explore a Debian control-file package listing as a dependency
//! graph.
//!
//! The listing is parsed and the graph built once per invocation, before any
//! query runs; a failed build in strict mode aborts with no partial results.

mod cmd;
mod io;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use output::OutputMode;
use pkgraph_core::{Config, ValidationMode, build_graph};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pkgr: package dependency graph explorer",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format; defaults to pretty on a TTY, text when piped.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for --format json).
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Read the package listing from this file instead of the configured
    /// status file (disables the remote fallback).
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Fail the whole build on records missing required fields instead of
    /// warning and continuing.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "List package names, cursor-paginated",
        after_help = "EXAMPLES:\n    # First page\n    pkgr list -n 20\n\n    # Page forward from a cursor\n    pkgr list --after libc6 -n 20\n\n    # Machine-readable output with cursors\n    pkgr list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        about = "Show one package with its dependency views",
        after_help = "EXAMPLES:\n    # Human-readable detail\n    pkgr show vim\n\n    # Machine-readable output\n    pkgr show vim --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(about = "Summarize the built graph")]
    Stats(cmd::stats::StatsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PKGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "pkgraph=debug,info"
        } else {
            "pkgraph=info,warn"
        })
    });

    let format = env::var("PKGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    let cwd = env::current_dir()?;
    let config = Config::load_or_default(&cwd)?;

    let mode = if cli.strict {
        ValidationMode::Strict
    } else {
        config.mode
    };

    let listing = io::load_listing(cli.file.as_deref(), &config)?;
    let graph = build_graph(&listing, mode)?;
    info!(packages = graph.node_count(), "graph ready");

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, &graph, &config, output),
        Commands::Show(ref args) => cmd::show::run_show(args, &graph, output),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, &graph, output),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let output = output::resolve_output_mode(cli.format, cli.json);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Core errors carry stable codes; usage errors get their own
            // exit code so scripts can tell them from lookup misses.
            let (cli_error, code) = match err.downcast_ref::<pkgraph_core::Error>() {
                Some(core_err) => {
                    let code = if core_err.is_usage() { 2 } else { 1 };
                    (output::CliError::from(core_err), code)
                }
                None => (output::CliError::new(format!("{err:#}")), 1),
            };
            if output::render_error(output, &cli_error).is_err() {
                eprintln!("error: {}", cli_error.message);
            }
            ExitCode::from(code)
        }
    }
}
