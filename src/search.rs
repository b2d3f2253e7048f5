//! Alpha-beta minimax search over generated moves, with a transposition
//! table keyed on mover + board string, and a time-budgeted root search.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::seq::SliceRandom;

use crate::board::{Board, PieceColor};
use crate::eval;
use crate::io;
use crate::moves::{self, Move};

/// Safety margin subtracted from the caller's time budget before the root
/// search gives up starting another move evaluation.
const TIME_SAFETY_MARGIN: Duration = Duration::from_millis(500);

/// Sentinel bounds for alpha-beta pruning and the running best-score
/// trackers. Deliberately finite and narrower than `eval::WIN_WEIGHT`, so a
/// genuine win evaluation still outranks a node with no legal moves to
/// explore (which falls back to returning one of these bounds unchanged).
const SEARCH_MIN: i32 = -3000;
const SEARCH_MAX: i32 = 3000;

/// Caches a board's minimax score, keyed by the side that moved into it and
/// its board string (see [`io::encode_board`]).
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<String, i32>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        TranspositionTable::default()
    }

    fn key(board: &Board, mover: PieceColor) -> String {
        format!("{} {}", io::side_letter(mover), io::encode_board(board))
    }

    fn get(&self, board: &Board, mover: PieceColor) -> Option<i32> {
        self.entries.get(&Self::key(board, mover)).copied()
    }

    fn insert(&mut self, board: &Board, mover: PieceColor, score: i32) {
        self.entries.insert(Self::key(board, mover), score);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Recursively scores `board`, `depth` plies deep, from `root_player`'s
/// perspective. `team` is whoever is to move at this node; the cache key
/// is tagged with `team` because that's the side whose move produced this
/// child board.
pub fn minimax(
    board: &Board,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    team: PieceColor,
    root_player: PieceColor,
    table: &mut TranspositionTable,
) -> i32 {
    if depth == 0 {
        return eval::evaluate(board, root_player);
    }

    let legal_moves = moves::generate_all_legal_moves(board, team);
    let next_team = team.opponent();

    if team == root_player {
        let mut max_eval = SEARCH_MIN;
        for mv in &legal_moves {
            let child = apply_move(board, mv);

            let score = if let Some(cached) = table.get(&child, team) {
                cached
            } else {
                let score = minimax(&child, depth - 1, alpha, beta, next_team, root_player, table);
                table.insert(&child, team, score);
                score
            };

            max_eval = max_eval.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = SEARCH_MAX;
        for mv in &legal_moves {
            let child = apply_move(board, mv);

            let score = if let Some(cached) = table.get(&child, team) {
                cached
            } else {
                let score = minimax(&child, depth - 1, alpha, beta, next_team, root_player, table);
                table.insert(&child, team, score);
                score
            };

            min_eval = min_eval.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}

fn apply_move(board: &Board, mv: &Move) -> Board {
    let mut child = board.clone();
    child
        .move_pieces(mv.dir, &mv.marbles)
        .expect("move produced by the generator must be legal");
    child
}

/// The outcome of a root search: the move chosen and its minimax value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMove {
    pub mv: Move,
    pub value: i32,
}

/// Searches `depth` plies for the best move for `team` to play on `board`,
/// stopping early once `time_budget` (minus a fixed safety margin) elapses.
/// Returns `None` if `team` has no legal moves.
pub fn find_best_move(board: &Board, team: PieceColor, depth: u32, time_budget: Duration) -> Option<BestMove> {
    let start = Instant::now();
    let safe_budget = time_budget.saturating_sub(TIME_SAFETY_MARGIN);

    let legal_moves = moves::generate_all_legal_moves(board, team);
    let mut table = TranspositionTable::new();
    let mut moves_iter = legal_moves.iter();

    // The first generated move is always kept, even if its score falls at
    // or below the search's sentinel bounds (possible for a position with a
    // steep material deficit) -- a scored move must never be dropped for
    // lacking a strictly better predecessor.
    let first = moves_iter.next()?;
    let child = apply_move(board, first);
    let mut best_value = minimax(&child, depth, SEARCH_MIN, SEARCH_MAX, team.opponent(), team, &mut table);
    let mut best_move = first.clone();
    let mut scored = 1usize;
    debug!("{:?} {:?} -> {best_value}", first.marbles, first.dir);

    if start.elapsed() < safe_budget {
        for mv in moves_iter {
            let child = apply_move(board, mv);
            let value = minimax(&child, depth, SEARCH_MIN, SEARCH_MAX, team.opponent(), team, &mut table);
            scored += 1;

            debug!("{:?} {:?} -> {value}", mv.marbles, mv.dir);

            if value > best_value {
                best_value = value;
                best_move = mv.clone();
            }

            if start.elapsed() >= safe_budget {
                warn!(
                    "search time budget exhausted after scoring {scored}/{} moves",
                    legal_moves.len()
                );
                break;
            }
        }
    }

    info!(
        "chosen move {:?} {:?}, score {best_value}, elapsed {:.2?}",
        best_move.marbles,
        best_move.dir,
        start.elapsed()
    );

    Some(BestMove { mv: best_move, value: best_value })
}

/// Suggests a random legal three-marble opening move. Used by the CLI's
/// opening-book shortcut; real search is unnecessary this early.
pub fn suggest_opening_move(board: &Board, team: PieceColor) -> Option<Move> {
    let triples = moves::find_triples(board, team);
    let candidates = moves::find_three_piece_moves(board, team, &triples);
    candidates.choose(&mut rand::thread_rng()).cloned()
}
