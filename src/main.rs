//! Lonpos Puzzle Solver
//!
//! Fills a board with the twelve Lonpos pieces (or the calendar with the seven
//! calendar pieces) and prints the tilings it finds.

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lonpos::{boards, Board, Variant};

/// Solves Lonpos boards and calendar puzzles.
#[derive(Parser)]
#[command(name = "lonpos")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a board and print the solutions.
    Solve {
        #[arg(long, value_enum, default_value_t = BoardArg::Rectangle)]
        board: BoardArg,
        /// Stop after this many solutions.
        #[arg(long, default_value_t = 1)]
        limit: usize,
        /// Print only the number of solutions found.
        #[arg(long)]
        quiet: bool,
    },
    /// Count the solutions of a board.
    Count {
        #[arg(long, value_enum, default_value_t = BoardArg::Rectangle)]
        board: BoardArg,
        /// Stop counting at this many solutions.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Solve the calendar for a date.
    Calendar {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
        day: u32,
        #[arg(long, default_value_t = 1)]
        limit: usize,
    },
    /// Show how many orientations each piece has on a board.
    Orientations {
        #[arg(long, value_enum, default_value_t = BoardArg::Rectangle)]
        board: BoardArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BoardArg {
    Rectangle,
    Triangle,
    Arrowhead,
    Butterfly,
    Pyramid,
}

impl From<BoardArg> for Variant {
    fn from(arg: BoardArg) -> Self {
        match arg {
            BoardArg::Rectangle => Variant::Rectangle,
            BoardArg::Triangle => Variant::Triangle,
            BoardArg::Arrowhead => Variant::Arrowhead,
            BoardArg::Butterfly => Variant::Butterfly,
            BoardArg::Pyramid => Variant::Pyramid,
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Solve {
            board,
            limit,
            quiet,
        }) => {
            run_solver(&mut Variant::from(board).board(), limit, quiet);
            Ok(())
        }
        Some(Command::Count { board, limit }) => {
            run_count(&mut Variant::from(board).board(), limit);
            Ok(())
        }
        Some(Command::Calendar { month, day, limit }) => {
            boards::calendar_board(month, day).map(|mut board| run_solver(&mut board, limit, false))
        }
        Some(Command::Orientations { board }) => {
            run_orientations(&Variant::from(board).board());
            Ok(())
        }
        None => {
            // default: one rectangle solution
            run_solver(&mut Variant::Rectangle.board(), 1, false);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs to stderr; `RUST_LOG` overrides the default `lonpos=info`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lonpos=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints up to `limit` solutions.
fn run_solver(board: &mut Board, limit: usize, quiet: bool) {
    let catalog = board.catalog().clone();
    let mut found = 0;

    for (i, solution) in board.solve_all().take(limit).enumerate() {
        found += 1;
        if !quiet {
            println!("Solution {}:", i + 1);
            println!("{}", solution.render(&catalog));
        }
    }

    if found == 0 {
        println!("No solution");
    } else {
        println!("Found {found} solutions");
    }
}

/// Prints the number of solutions, exhausting the search unless limited.
fn run_count(board: &mut Board, limit: Option<usize>) {
    let mut solutions = board.solve_all();
    let count = match limit {
        Some(limit) => solutions.by_ref().take(limit).count(),
        None => solutions.by_ref().count(),
    };
    info!(event = "count", solutions = count, nodes = solutions.nodes());
    println!("{count} solutions");
}

/// Prints the orientation count of every piece for the board's rank.
fn run_orientations(board: &Board) {
    for piece in board.catalog().pieces() {
        let count = board.orientations(&piece.name).map_or(0, <[_]>::len);
        println!("{}: {count}", piece.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_solve() {
        let cli = Cli::try_parse_from(["lonpos", "solve", "--board", "pyramid", "--limit", "2"])
            .unwrap();
        match cli.command {
            Some(Command::Solve {
                board,
                limit,
                quiet,
            }) => {
                assert_eq!(Variant::from(board), Variant::Pyramid);
                assert_eq!(limit, 2);
                assert!(!quiet);
            }
            _ => panic!("expected solve"),
        }
    }

    #[test]
    fn test_parse_calendar_rejects_bad_month() {
        assert!(Cli::try_parse_from(["lonpos", "calendar", "--month", "13", "--day", "1"]).is_err());
        assert!(Cli::try_parse_from(["lonpos", "calendar", "--month", "2", "--day", "0"]).is_err());
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["lonpos"]).unwrap();
        assert!(cli.command.is_none());
    }
}
