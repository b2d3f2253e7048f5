use std::time::Duration;

use abalone_engine::board::{Board, PieceColor};
use abalone_engine::moves::generate_all_legal_moves;
use abalone_engine::search::{find_best_move, minimax, TranspositionTable};

#[test]
fn default_opening_has_forty_four_legal_moves() {
    let board = Board::default_layout();
    let moves = generate_all_legal_moves(&board, PieceColor::Black);
    assert_eq!(moves.len(), 44);
}

#[test]
fn alpha_beta_matches_full_width_search() {
    let board = Board::belgian_daisy();

    let mut pruned_table = TranspositionTable::new();
    let pruned = minimax(
        &board,
        2,
        i32::MIN,
        i32::MAX,
        PieceColor::White,
        PieceColor::White,
        &mut pruned_table,
    );

    // A search window wide enough that beta <= alpha never triggers is
    // equivalent to full-width minimax.
    let mut full_width_table = TranspositionTable::new();
    let full_width = minimax(
        &board,
        2,
        i32::MIN / 2,
        i32::MAX / 2,
        PieceColor::White,
        PieceColor::White,
        &mut full_width_table,
    );

    assert_eq!(pruned, full_width);
}

#[test]
fn transposition_table_caches_repeated_children() {
    let board = Board::default_layout();
    let mut table = TranspositionTable::new();
    let score = minimax(&board, 2, i32::MIN, i32::MAX, PieceColor::Black, PieceColor::Black, &mut table);
    assert!(!table.is_empty());

    // Re-running against the now-populated table must reproduce the same
    // score, since every reachable child is already cached.
    let cached_score = minimax(&board, 2, i32::MIN, i32::MAX, PieceColor::Black, PieceColor::Black, &mut table);
    assert_eq!(score, cached_score);
}

#[test]
fn root_search_respects_its_time_budget() {
    let board = Board::default_layout();
    let start = std::time::Instant::now();
    let result = find_best_move(&board, PieceColor::Black, 4, Duration::from_secs(1));
    assert!(result.is_some());
    // The 0.5s safety margin means search should stop well inside a couple
    // of seconds of wall clock even at a deeper ply count than the budget
    // alone would otherwise finish in time for.
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[test]
fn winner_is_none_at_the_start() {
    let board = Board::default_layout();
    assert_eq!(board.winner(), None);
}
