//! Abalone engine CLI.
//!
//! ## Usage
//!
//! - `abalone --layout default --depth 3 --time 5` - search a named opening
//!   layout and print the best move plus the resulting board
//! - `abalone --scenario path/to/scenario.txt --depth 3 --time 5` - search a
//!   saved scenario instead of a named layout
//! - `abalone --opening` - suggest a random three-marble opening move

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::info;

use abalone_engine::board::{Board, PieceColor};
use abalone_engine::{io, search};

#[derive(Parser)]
#[command(name = "abalone")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A named starting layout, ignored if --scenario is given.
    #[arg(long, value_enum, default_value_t = Layout::Default)]
    layout: Layout,
    /// Path to a scenario file (two lines: side letter, board string).
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Search depth in plies.
    #[arg(long, default_value_t = 3)]
    depth: u32,
    /// Time budget in seconds; search stops early once it's spent.
    #[arg(long, default_value_t = 5)]
    time: u64,
    /// Suggest a random legal three-marble opening move instead of searching.
    #[arg(long)]
    opening: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Layout {
    Default,
    Belgian,
    German,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let (team, board) = match &cli.scenario {
        Some(path) => io::read_scenario(path).unwrap_or_else(|e| {
            eprintln!("failed to read scenario {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let board = match cli.layout {
                Layout::Default => Board::default_layout(),
                Layout::Belgian => Board::belgian_daisy(),
                Layout::German => Board::german_daisy(),
            };
            (PieceColor::Black, board)
        }
    };

    if cli.opening {
        run_opening(&board, team);
        return;
    }

    run_search(&board, team, cli.depth, cli.time);
}

fn run_search(board: &Board, team: PieceColor, depth: u32, time: u64) {
    info!("searching depth {depth} for up to {time}s");
    match search::find_best_move(board, team, depth, Duration::from_secs(time)) {
        Some(result) => {
            print!("best move: ");
            io::write_move(&mut std::io::stdout(), &result.mv.marbles, result.mv.dir).unwrap();
            println!("value: {}", result.value);

            let mut after = board.clone();
            after
                .move_pieces(result.mv.dir, &result.mv.marbles)
                .expect("a move returned by find_best_move is always legal on its own board");
            println!("resulting board: {}", io::encode_board(&after));
        }
        None => println!("no legal moves available"),
    }
}

fn run_opening(board: &Board, team: PieceColor) {
    match search::suggest_opening_move(board, team) {
        Some(mv) => {
            print!("suggested opening: ");
            io::write_move(&mut std::io::stdout(), &mv.marbles, mv.dir).unwrap();
        }
        None => println!("no opening move found"),
    }
}
