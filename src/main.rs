//! # `csp_solver`
//!
//! A command-line Sudoku solver built on a binary constraint-satisfaction
//! engine: every cell is a variable over 1..=9, AC-3 propagation prunes the
//! domains, and MRV/LCV-guided backtracking search finishes the job.
//!
//! ## Usage
//!
//! ```sh
//! # Solve one puzzle file (nine lines, `_`/`.`/`0` for blanks)
//! csp_solver puzzle.txt
//! csp_solver solve --path puzzle.txt
//!
//! # Solve every puzzle file under a directory
//! csp_solver dir --path puzzles/
//!
//! # Pick heuristics, cap the search, generate shell completions
//! csp_solver solve --path puzzle.txt --variable-order first --value-order lexical
//! csp_solver solve --path puzzle.txt --max-decisions 100000
//! csp_solver completions bash
//! ```
//!
//! Every command accepts `--debug` (verbose engine logging via `env_logger`),
//! `--verify` (check the returned board against the Sudoku rules) and
//! `--stats` (print a search-statistics table, including jemalloc memory
//! figures).

use crate::csp::grid::Grid;
use crate::csp::search::{Solver, SolverStats};
use crate::csp::selection::{
    FirstUnassigned, Lcv, Lexical, Mrv, Shuffled, ValueOrdering, VariableSelection,
};
use crate::sudoku::parse::{ParseError, parse_file};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};
use walkdir::WalkDir;

mod csp;
mod sudoku;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "csp_solver", version, about = "A constraint-propagation Sudoku solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute.
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve one puzzle file.
    Solve {
        /// Path to the puzzle file (see `sudoku::parse` for the format).
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every puzzle file under a directory, recursively.
    Dir {
        /// Path to the directory to scan.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completions.
    Completions {
        /// The shell to generate completions for.
        shell: clap_complete::Shell,
    },
}

/// Common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable verbose engine logging (propagation and decision events).
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Check the returned board against the Sudoku rules.
    #[arg(long, default_value_t = true)]
    verify: bool,

    /// Print search statistics after solving.
    #[arg(long, default_value_t = true)]
    stats: bool,

    /// How the next variable to branch on is picked.
    #[arg(long, value_enum, default_value_t = VariableOrder::Mrv)]
    variable_order: VariableOrder,

    /// How a variable's candidate digits are ordered.
    #[arg(long, value_enum, default_value_t = ValueOrder::Lcv)]
    value_order: ValueOrder,

    /// Abort after this many decisions (safety net for pathological input).
    #[arg(long)]
    max_decisions: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
enum VariableOrder {
    /// Minimum-Remaining-Values: smallest domain first.
    #[default]
    Mrv,
    /// First unassigned cell in row-major order.
    First,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ValueOrder {
    /// Least-Constraining-Value: fewest neighbour conflicts first.
    #[default]
    Lcv,
    /// Ascending digit order.
    Lexical,
    /// Uniformly random order (non-reproducible runs).
    Shuffled,
}

/// Honours `RUST_LOG`; `--debug` raises the default filter to `debug` so
/// the engine's decision and propagation events show up.
fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();

    let active_common = match &cli.command {
        Some(
            Commands::Solve { common, .. } | Commands::Dir { common, .. },
        ) => common,
        _ => &cli.common,
    };
    init_logging(active_common.debug);

    // A bare path without a subcommand solves that file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            solve_or_exit(&path, &cli.common);
            return;
        }
    }

    match cli.command {
        Some(Commands::Solve { path, common }) => solve_or_exit(&path, &common),
        Some(Commands::Dir { path, common }) => {
            let mut solved = 0_usize;
            for entry in WalkDir::new(&path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
            {
                if !is_puzzle_file(entry.path()) {
                    eprintln!("Skipping non-puzzle file: {}", entry.path().display());
                    continue;
                }
                match solve_one(entry.path(), &common) {
                    Ok(()) => solved += 1,
                    Err(e) => eprintln!("Skipping {}: {e}", entry.path().display()),
                }
            }
            if solved == 0 {
                eprintln!("No puzzle files found under {}", path.display());
                std::process::exit(1);
            }
        }
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        }
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

/// Puzzle files are plain text; anything else under a swept directory
/// (READMEs, dotfiles) is skipped rather than treated as a parse failure.
fn is_puzzle_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "txt" || ext == "sudoku")
}

/// A bad puzzle file is fatal when it is the one file the user asked for.
fn solve_or_exit(path: &Path, common: &CommonOptions) {
    if let Err(e) = solve_one(path, common) {
        eprintln!("Error parsing puzzle file: {e}");
        std::process::exit(2);
    }
}

/// Parses one puzzle file, solves it and reports the outcome.
///
/// # Errors
///
/// Returns the [`ParseError`] if the file cannot be read or parsed; nothing
/// has been solved or printed beyond the header line in that case.
fn solve_one(path: &Path, common: &CommonOptions) -> Result<(), ParseError> {
    println!("Solving: {}", path.display());

    let time = std::time::Instant::now();
    let grid = parse_file(path)?;
    let parse_time = time.elapsed();

    println!("Puzzle:\n{grid}");

    epoch::advance().unwrap();
    let (solution, elapsed, solver_stats) = run_solver(&grid, common);
    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    #[allow(clippy::cast_precision_loss)]
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    #[allow(clippy::cast_precision_loss)]
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_solution(&grid, solution.as_ref());
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &grid,
            &solver_stats,
            allocated_mib,
            resident_mib,
        );
    }

    match solution {
        Some(solved) => println!("Solution:\n{solved}"),
        None if solver_stats.interrupted => {
            println!("Search interrupted by the decision limit");
        }
        None => println!("No solution exists for this input"),
    }

    Ok(())
}

/// Dispatches to a concrete solver for the chosen heuristic pair.
fn run_solver(
    grid: &Grid,
    common: &CommonOptions,
) -> (Option<Grid>, Duration, SolverStats) {
    match (common.variable_order, common.value_order) {
        (VariableOrder::Mrv, ValueOrder::Lcv) => solve_with(Mrv, Lcv, grid, common),
        (VariableOrder::Mrv, ValueOrder::Lexical) => solve_with(Mrv, Lexical, grid, common),
        (VariableOrder::Mrv, ValueOrder::Shuffled) => solve_with(Mrv, Shuffled, grid, common),
        (VariableOrder::First, ValueOrder::Lcv) => {
            solve_with(FirstUnassigned, Lcv, grid, common)
        }
        (VariableOrder::First, ValueOrder::Lexical) => {
            solve_with(FirstUnassigned, Lexical, grid, common)
        }
        (VariableOrder::First, ValueOrder::Shuffled) => {
            solve_with(FirstUnassigned, Shuffled, grid, common)
        }
    }
}

fn solve_with<V: VariableSelection, O: ValueOrdering>(
    selector: V,
    ordering: O,
    grid: &Grid,
    common: &CommonOptions,
) -> (Option<Grid>, Duration, SolverStats) {
    let mut solver = Solver::new(selector, ordering);
    if let Some(limit) = common.max_decisions {
        solver = solver.with_decision_limit(limit);
    }

    let time = std::time::Instant::now();
    let solution = solver.solve(grid);
    let elapsed = time.elapsed();

    if common.debug {
        println!("Solved: {}", solution.is_some());
        println!("Time: {elapsed:?}");
        println!("Stats: {:?}", solver.stats());
    }

    (solution, elapsed, *solver.stats())
}

/// Checks the returned board against the Sudoku rules; panics on a board
/// that claims to be a solution but is not.
fn verify_solution(puzzle: &Grid, solution: Option<&Grid>) {
    if let Some(solved) = solution {
        let givens_kept = puzzle
            .variables()
            .zip(solved.variables())
            .all(|(given, cell)| given.value().is_none_or(|d| cell.value() == Some(d)));
        let ok = solved.is_valid_solution() && givens_kept;
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    } else {
        println!("UNSAT");
    }
}

/// Helper to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    #[allow(clippy::cast_precision_loss)]
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    grid: &Grid,
    s: &SolverStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let givens = grid.variables().filter(|v| v.is_assigned()).count();

    println!("\n=======================[ Problem Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Givens", givens);
    stat_line("Blanks", grid.unassigned().count());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Interrupted", s.interrupted);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
