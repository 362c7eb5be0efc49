// ABOUTME: Entry point for the kiln CLI application.
// ABOUTME: Parses arguments, dispatches, and owns the print-and-exit error path.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use kiln::output::{Output, OutputMode};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    if let Err(e) = run(cli, output) {
        let output = Output::new(mode);
        output.error(&e.to_string());
        if e.is_usage() {
            eprintln!("Usage: kiln run <target> [<version>]");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, output: Output) -> kiln::error::Result<()> {
    match cli.command {
        Commands::Run { target, version } => commands::run(target, version, output),
    }
}
