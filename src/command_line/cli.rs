#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use logic_puzzles::modeling::{Check, ConstraintSet, Model, Solution};
use logic_puzzles::puzzles::Puzzle;
use logic_puzzles::puzzles::bags::Bags;
use logic_puzzles::puzzles::icecream::IceCream;
use logic_puzzles::puzzles::new_years::NewYears;
use logic_puzzles::puzzles::schedule::Schedule;
use logic_puzzles::puzzles::zebra::Zebra;
use logic_puzzles::sat::cnf::Cnf;
use logic_puzzles::sat::dimacs::export_file;
use logic_puzzles::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::{debug, info};

/// Defines the command-line interface for the puzzle solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "logic-puzzles",
    version,
    about = "Classic logic-grid puzzles solved with SAT"
)]
pub(crate) struct Cli {
    /// Specifies the puzzle to solve (e.g. `zebra`, `schedule`, `all`).
    #[clap(subcommand)]
    pub command: Commands,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve the zebra puzzle: who drinks water, and who owns the zebra?
    Zebra {
        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Match three beauty queens with their bags and destinations.
    Bags {
        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Work out each kid's two ice-cream flavors and pick-up time.
    /// Every solution is listed.
    IceCream {
        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Reconstruct a morning timetable of classes, teachers and rooms.
    /// Every solution is listed.
    Schedule {
        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Pair four couples with their New Year's resolutions.
    NewYears {
        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every puzzle in turn.
    All {
        /// Common options applied to every puzzle.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    pub(crate) fn common(&self) -> Option<&CommonOptions> {
        match self {
            Self::Zebra { common }
            | Self::Bags { common }
            | Self::IceCream { common }
            | Self::Schedule { common }
            | Self::NewYears { common }
            | Self::All { common } => Some(common),
            Self::Completions { .. } => None,
        }
    }
}

/// Defines common command-line options shared across the puzzle subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the solving process.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// List every solution instead of the first one found.
    #[arg(short, long, default_value_t = false)]
    pub(crate) all_solutions: bool,

    /// Enable printing of problem and search statistics after solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Print the value of every declared symbol in the model.
    #[arg(short = 'm', long, default_value_t = false)]
    pub(crate) print_model: bool,

    /// Skip re-checking each model against every asserted clue.
    #[arg(long, default_value_t = false)]
    pub(crate) no_verify: bool,

    /// Write the puzzle's CNF encoding to this path in DIMACS format.
    #[arg(long, value_name = "PATH")]
    pub(crate) export_dimacs: Option<PathBuf>,
}

impl CommonOptions {
    /// Options for one puzzle of a multi-puzzle run: the DIMACS path gets the
    /// puzzle name added to its stem, so `out.cnf` becomes `out-zebra.cnf`.
    pub(crate) fn for_puzzle(&self, name: &str) -> Self {
        Self {
            export_dimacs: self
                .export_dimacs
                .as_deref()
                .map(|path| puzzle_path(path, name)),
            ..self.clone()
        }
    }
}

fn puzzle_path(path: &Path, name: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map_or_else(|| "puzzle".into(), |s| s.to_string_lossy());
    let file = match path.extension() {
        Some(ext) => format!("{stem}-{name}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{name}"),
    };
    path.with_file_name(file)
}

/// Runs the puzzle subcommands. Returns `false` if any puzzle failed.
pub(crate) fn run(command: &Commands) -> bool {
    match command {
        Commands::Zebra { common } => report::<Zebra>(common),
        Commands::Bags { common } => report::<Bags>(common),
        Commands::IceCream { common } => report::<IceCream>(common),
        Commands::Schedule { common } => report::<Schedule>(common),
        Commands::NewYears { common } => report::<NewYears>(common),
        Commands::All { common } => {
            let outcomes = [
                report::<Zebra>(&common.for_puzzle(Zebra::NAME)),
                report::<Bags>(&common.for_puzzle(Bags::NAME)),
                report::<IceCream>(&common.for_puzzle(IceCream::NAME)),
                report::<Schedule>(&common.for_puzzle(Schedule::NAME)),
                report::<NewYears>(&common.for_puzzle(NewYears::NAME)),
            ];
            outcomes.iter().all(|&ok| ok)
        }
        Commands::Completions { .. } => true,
    }
}

fn report<P: Puzzle>(common: &CommonOptions) -> bool {
    match solve_puzzle::<P>(common) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("{}: {e}", P::NAME);
            false
        }
    }
}

/// Builds, solves and reports one puzzle.
///
/// # Errors
///
/// [`Error::Unsatisfiable`] naming the conflicting clues, [`Error::Unknown`],
/// a [`Error::Verification`] failure, or an [`Error::Io`] from the DIMACS export.
pub(crate) fn solve_puzzle<P: Puzzle>(common: &CommonOptions) -> Result<()> {
    println!("=====================[ {} ]=====================", P::NAME);

    let time = Instant::now();
    let (constraints, puzzle) = P::build()?;
    let encoding = constraints.encode();
    let build_time = time.elapsed();
    info!(
        puzzle = P::NAME,
        symbols = constraints.symbols().len(),
        assertions = constraints.len(),
        "built constraints"
    );

    if let Some(path) = &common.export_dimacs {
        export_file(path, &encoding.cnf, &encoding.comments(constraints.symbols()))?;
        println!("DIMACS written to: {}", path.display());
    }

    let enumerate = common.all_solutions || P::ENUMERATE;
    let time = Instant::now();
    let outcome = if enumerate {
        report_all(&constraints, &puzzle, common)
    } else {
        report_one(&constraints, &puzzle, common)
    };
    let elapsed = time.elapsed();
    debug!(puzzle = P::NAME, ?elapsed, "solved");

    if common.stats {
        let solutions = outcome.as_ref().map_or(0, |&n| n);
        print_stats(build_time, elapsed, &encoding.cnf, &constraints, solutions);
    }

    let solutions = outcome?;
    println!("\nSATISFIABLE ({solutions} solution{})", if solutions == 1 { "" } else { "s" });
    Ok(())
}

fn report_one<P: Puzzle>(
    constraints: &ConstraintSet,
    puzzle: &P,
    common: &CommonOptions,
) -> Result<usize> {
    match constraints.check() {
        Check::Sat(model) => {
            verify(constraints, &model, common)?;
            print!("{}", puzzle.describe(&model)?);
            if common.print_model {
                print_model(constraints, &model);
            }
            Ok(1)
        }
        Check::Unsat { clues } => Err(Error::Unsatisfiable { clues }),
        Check::Unknown => Err(Error::Unknown("no verdict".to_owned())),
    }
}

fn report_all<P: Puzzle>(
    constraints: &ConstraintSet,
    puzzle: &P,
    common: &CommonOptions,
) -> Result<usize> {
    let solutions: Vec<Solution<P::Subject>> = puzzle.solutions(constraints)?;
    if solutions.is_empty() {
        // Re-check once to name the clues that rule every solution out.
        return Err(match constraints.check() {
            Check::Unsat { clues } => Error::Unsatisfiable { clues },
            Check::Sat(_) | Check::Unknown => {
                Error::Unknown("enumeration found no solution".to_owned())
            }
        });
    }

    for (i, solution) in solutions.iter().enumerate() {
        verify(constraints, &solution.model, common)?;
        println!("\nSolution {}:", i + 1);
        print!("{solution}");
        println!();
        print!("{}", puzzle.describe(&solution.model)?);
        if common.print_model {
            print_model(constraints, &solution.model);
        }
    }
    Ok(solutions.len())
}

fn verify(constraints: &ConstraintSet, model: &Model, common: &CommonOptions) -> Result<()> {
    if common.no_verify {
        return Ok(());
    }
    constraints.verify(model)?;
    debug!(assertions = constraints.len(), "model verified");
    Ok(())
}

fn print_model(constraints: &ConstraintSet, model: &Model) {
    println!("\nModel:");
    for symbol in constraints.symbols() {
        println!("  {symbol}");
        for (row, value) in symbol.read(model) {
            println!("    {row:<24} {}", value.as_deref().unwrap_or("?"));
        }
    }
}

/// Allocated and resident memory in MiB, if jemalloc reports them.
fn memory_mib() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    let mib = |bytes: usize| bytes as f64 / (1024.0 * 1024.0);
    Some((mib(allocated), mib(resident)))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    build_time: Duration,
    elapsed: Duration,
    cnf: &Cnf,
    constraints: &ConstraintSet,
    solutions: usize,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Build time (s)", format!("{:.3}", build_time.as_secs_f64()));
    stat_line("Symbols", constraints.symbols().len());
    stat_line("Assertions", constraints.len());
    stat_line("Variables", cnf.num_vars);
    stat_line("Clauses", cnf.clauses.len());
    stat_line("Literals", cnf.num_literals());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Solutions", solutions, elapsed_secs);
    if let Some((allocated, resident)) = memory_mib() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
