//! CLI entry point for the puzzle solver.
//!
//! Usage:
//!   puzzle-solver eight-puzzle [--grid <json>] [options]
//!   puzzle-solver river-crossing [--missionaries <n>] [--cannibals <n>] [options]
//!
//! Options:
//!   --heuristic <h>         8-puzzle frontier ordering (default: misplaced-plus-moves)
//!   --max-expansions <n>    Stop after this many expansions (default: 1000000)
//!   --timeout <seconds>     Stop after this much wall time (default: none)
//!   --json                  Print a JSON report instead of text
//!   -v, --verbose           Raise log level (repeatable)
//!
//! Exit codes: 0 solved, 1 no solution, 2 bad input.

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use log::info;
use serde::Serialize;

use puzzle_solver::{
    render_path, solve_eight_puzzle, solve_river_crossing, Heuristic, PuzzleState, Result,
    SearchConfig, SearchResult, SearchStats, SearchStatus, Solution,
};

/// Starting grid used when none is supplied
const DEFAULT_GRID: [[u8; 3]; 3] = [[8, 1, 7], [4, 5, 6], [2, 0, 3]];

#[derive(Parser)]
#[command(name = "puzzle-solver")]
#[command(about = "Best-first and depth-first search for small puzzles")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an 8-tile sliding puzzle with best-first search
    EightPuzzle {
        /// Starting grid as JSON, e.g. "[[8,1,7],[4,5,6],[2,0,3]]"
        #[arg(long)]
        grid: Option<String>,

        /// Frontier ordering
        #[arg(long, value_enum)]
        heuristic: Option<Heuristic>,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Solve missionaries and cannibals with depth-first search
    RiverCrossing {
        /// Missionaries starting on the left bank
        #[arg(long, default_value = "3")]
        missionaries: u32,

        /// Cannibals starting on the left bank
        #[arg(long, default_value = "3")]
        cannibals: u32,

        #[command(flatten)]
        limits: LimitArgs,
    },
}

#[derive(Args)]
struct LimitArgs {
    /// Maximum number of state expansions
    #[arg(long, default_value = "1000000")]
    max_expansions: usize,

    /// Maximum search time in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl LimitArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            max_expansions: self.max_expansions,
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

/// Output format for a search result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    puzzle: &'static str,
    solved: bool,
    status: SearchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<String>>,
    stats: SearchStats,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match run(cli.command) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };
    std::process::exit(code);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Returns whether the puzzle was solved
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::EightPuzzle {
            grid,
            heuristic,
            limits,
        } => {
            let rows = parse_grid(grid.as_deref())?;
            let start = PuzzleState::from_rows(&rows)?;
            let heuristic = heuristic.unwrap_or_default();
            info!("solving 8-puzzle {} with {:?}", start.id(), heuristic);

            let result = solve_eight_puzzle(start, &PuzzleState::solved(), heuristic, &limits.config())?;
            report("eight-puzzle", &result, limits.json, |solution| {
                println!("Moves: {}", solution.moves);
                println!("{}", render_path(&solution.path));
            })
        }
        Commands::RiverCrossing {
            missionaries,
            cannibals,
            limits,
        } => {
            info!(
                "solving river crossing with {} missionaries and {} cannibals",
                missionaries, cannibals
            );
            let result = solve_river_crossing(missionaries, cannibals, &limits.config())?;
            let expanded = result.stats.expanded;
            report("river-crossing", &result, limits.json, |solution| {
                println!("Final node: {} reached.", solution.goal);
                println!("Moves: {}", solution.moves);
                println!("Expanded: {}", expanded);
                println!("{}", render_path(&solution.path));
            })
        }
    }
}

/// Rows of the `--grid` JSON, or the default grid when none was given
fn parse_grid(grid: Option<&str>) -> Result<Vec<Vec<u8>>> {
    match grid {
        Some(json) => Ok(serde_json::from_str(json)?),
        None => Ok(DEFAULT_GRID.iter().map(|row| row.to_vec()).collect()),
    }
}

fn report<N>(
    puzzle: &'static str,
    result: &SearchResult<N>,
    json: bool,
    print_solution: impl FnOnce(&Solution<N>),
) -> Result<bool> {
    if json {
        let output = SolveOutput {
            puzzle,
            solved: result.is_solved(),
            status: result.status,
            moves: result.solution.as_ref().map(|s| s.moves),
            path: result.solution.as_ref().map(|s| s.path.clone()),
            stats: result.stats.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(result.is_solved());
    }

    match &result.solution {
        Some(solution) => print_solution(solution),
        None => println!(
            "No solution found ({}) after {} expansions",
            describe(result.status),
            result.stats.expanded
        ),
    }
    Ok(result.is_solved())
}

fn describe(status: SearchStatus) -> &'static str {
    match status {
        SearchStatus::Solved => "solved",
        SearchStatus::Exhausted => "search space exhausted",
        SearchStatus::LimitReached => "expansion limit reached",
        SearchStatus::TimedOut => "timed out",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_solver::Error;

    #[test]
    fn test_parse_grid_default() {
        let rows = parse_grid(None).unwrap();
        assert_eq!(PuzzleState::from_rows(&rows).unwrap().id(), "817456203");
    }

    #[test]
    fn test_parse_grid_json() {
        let rows = parse_grid(Some("[[1,2,3],[4,5,6],[7,8,0]]")).unwrap();
        assert_eq!(rows, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 0]]);
        assert!(matches!(parse_grid(Some("[[1,2,3]")), Err(Error::Json(_))));
    }

    #[test]
    fn test_grid_is_the_only_puzzle_source() {
        let cli = Cli::try_parse_from(["puzzle-solver", "eight-puzzle", "--grid", "[[0]]"]).unwrap();
        assert!(matches!(cli.command, Commands::EightPuzzle { grid: Some(_), .. }));

        assert!(Cli::try_parse_from(["puzzle-solver", "eight-puzzle", "--file", "puzzle.json"]).is_err());
        assert!(Cli::try_parse_from(["puzzle-solver", "eight-puzzle", "--stdin"]).is_err());
    }
}
