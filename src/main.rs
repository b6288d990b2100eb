//! # logic-puzzles
//!
//! Solves classic logic-grid puzzles by encoding their clues as SAT problems.
//!
//! ## Usage
//!
//! ```sh
//! logic-puzzles [SUBCOMMAND] [OPTIONS]
//! ```
//!
//! ### Subcommands
//!
//! -   `zebra`: who drinks water, and who owns the zebra?
//! -   `bags`: three beauty queens, their suitcases and destinations.
//! -   `ice-cream`: five kids, two scoops each, five pick-up times.
//! -   `schedule`: a morning timetable of classes, teachers and rooms.
//! -   `new-years`: four couples and their resolutions.
//! -   `all`: every puzzle in turn.
//! -   `completions <SHELL>`: print a shell completion script.
//!
//! ### Options (every puzzle subcommand)
//!
//! -   `-d, --debug`: debug-level logging on stderr.
//! -   `-a, --all-solutions`: list every solution. On by default for
//!     `ice-cream` and `schedule`.
//! -   `-s, --stats`: print problem and search statistics.
//! -   `-m, --print-model`: print the value of every declared symbol.
//! -   `--no-verify`: skip re-checking models against the clues.
//! -   `--export-dimacs <PATH>`: write the CNF encoding in DIMACS format.
//!
//! `RUST_LOG` overrides the log level chosen by `--debug`.
//!
//! The exit status is 1 if any puzzle is unsatisfiable, undecided, fails
//! verification, or cannot be exported.

use crate::command_line::cli::{Cli, Commands, run};
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod command_line;

/// Global allocator using `tikv-jemallocator` for memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Sends logs to stderr. `RUST_LOG` wins over the `--debug` default.
fn init_tracing(debug: bool) {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            "logic-puzzles",
            &mut std::io::stdout(),
        );
        return ExitCode::SUCCESS;
    }

    init_tracing(cli.command.common().is_some_and(|c| c.debug));

    if run(&cli.command) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
