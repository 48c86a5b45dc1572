use std::io;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_file;
mod printer;

use commands::{catalog::CatalogArgs, run::RunArgs};

/// Process exit codes. CI scripts branch on these, so they are part of the
/// public contract.
pub mod exit {
    pub const SUCCESS: i32 = 0;
    pub const ISSUES_FOUND: i32 = 1;
    pub const FAILURE: i32 = 3;
    pub const TIMEOUT: i32 = 4;
    pub const NO_FILES: i32 = 5;
}

#[derive(Parser)]
#[command(name = "lintmux")]
#[command(about = "Runs many source analyses as one tool with one report")]
#[command(version)]
struct Cli {
    /// Print scheduling detail and per-analysis statuses.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the active analyses over the tree and report findings.
    Run(RunArgs),

    /// List every registered analysis, group, and preset.
    Catalog(CatalogArgs),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Commands::Run(args) => args.execute(cli.verbose),
        Commands::Catalog(args) => args.execute(),
    }
    .unwrap_or_else(|err| {
        eprintln!("{} {err:#}", "error:".red().bold());
        exit::FAILURE
    });

    process::exit(code);
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
