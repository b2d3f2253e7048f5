//! Static board evaluation: material, centrality, enemy-edge pressure, and
//! group cohesion, combined into a single heuristic score for one side.

use crate::board::{Board, PieceColor};
use crate::moves;

const STARTING_MARBLES: i32 = 14;
const WIN_WEIGHT: i32 = 4096;
const PIECE_WEIGHT: i32 = 150;
const GROUP_WEIGHT: [i32; 3] = [0, 1, 2];

/// Ring-distance-from-center weight, one entry per board cell, indexed
/// `[row][col]` in the same top-down internal row order as [`crate::board::Board`].
/// Transcribed verbatim; symmetric top-to-bottom around row 4 (the middle row).
#[rustfmt::skip]
const DISTANCE_TILE_ARRAY: [&[i32]; 9] = [
    &[0, 0, 0, 0, 0],
    &[0, 1, 1, 1, 1, 0],
    &[0, 1, 2, 2, 2, 1, 0],
    &[0, 1, 2, 3, 3, 2, 1, 0],
    &[0, 1, 2, 3, 4, 3, 2, 1, 0],
    &[0, 1, 2, 3, 3, 2, 1, 0],
    &[0, 1, 2, 2, 2, 1, 0],
    &[0, 1, 1, 1, 1, 0],
    &[0, 0, 0, 0, 0],
];

/// Same shape as [`DISTANCE_TILE_ARRAY`] but scored for the opponent's
/// pieces: edges are weighted heavily (pushing enemy marbles to the rim is
/// good for us). Transcribed verbatim, also symmetric top-to-bottom around
/// row 4.
#[rustfmt::skip]
const ENEMY_DISTANCE_TILE_ARRAY: [&[i32]; 9] = [
    &[8, 8, 8, 8, 8],
    &[8, 3, 3, 3, 3, 8],
    &[8, 3, 2, 2, 2, 3, 8],
    &[8, 3, 2, 3, 3, 2, 3, 8],
    &[8, 3, 2, 3, 4, 3, 2, 3, 8],
    &[8, 3, 2, 3, 3, 2, 3, 8],
    &[8, 3, 2, 2, 2, 3, 8],
    &[8, 3, 3, 3, 3, 8],
    &[8, 8, 8, 8, 8],
];

fn points_for_pieces(board: &Board, team: PieceColor) -> i32 {
    let (own, opponent) = match team {
        PieceColor::White => (board.white_count as i32, board.black_count as i32),
        PieceColor::Black => (board.black_count as i32, board.white_count as i32),
        PieceColor::Empty => return 0,
    };
    if opponent <= 8 {
        return WIN_WEIGHT;
    }
    (STARTING_MARBLES - opponent) * PIECE_WEIGHT - (STARTING_MARBLES - own) * (PIECE_WEIGHT * 10)
}

fn points_for_spaces_from_center(board: &Board, team: PieceColor) -> i32 {
    let mut points = 0;
    for r in 0..board.rows() {
        for c in 0..board.row_len(r) {
            if board.get_raw((r as i32, c as i32)) == team {
                points += DISTANCE_TILE_ARRAY[r][c];
            }
        }
    }
    points
}

fn points_for_spaces_from_center_enemy(board: &Board, team: PieceColor) -> i32 {
    let enemy = team.opponent();
    let mut points = 0;
    for r in 0..board.rows() {
        for c in 0..board.row_len(r) {
            if board.get_raw((r as i32, c as i32)) == enemy {
                points += ENEMY_DISTANCE_TILE_ARRAY[r][c];
            }
        }
    }
    points
}

fn points_for_groups(board: &Board, team: PieceColor) -> i32 {
    let triples = moves::find_triples(board, team).len() as i32;
    let doubles = moves::find_doubles(board, team).len() as i32;
    triples * GROUP_WEIGHT[2] + doubles * GROUP_WEIGHT[1]
}

/// Scores `board` from `team`'s perspective: material dominates, then
/// group cohesion, then centrality for both sides.
pub fn evaluate(board: &Board, team: PieceColor) -> i32 {
    points_for_groups(board, team)
        + points_for_spaces_from_center(board, team)
        + points_for_pieces(board, team)
        + points_for_spaces_from_center_enemy(board, team)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_opening_scores_equal() {
        let board = Board::default_layout();
        assert_eq!(evaluate(&board, PieceColor::White), evaluate(&board, PieceColor::Black));
    }

    #[test]
    fn win_weight_dominates_when_opponent_near_elimination() {
        let mut board = Board::empty();
        for (row, col) in [('E', 5), ('E', 6), ('E', 7)] {
            board.set(crate::coord::Position::new(row, col), PieceColor::White).unwrap();
        }
        for col in 1..=5 {
            board.set(crate::coord::Position::new('A', col), PieceColor::Black).unwrap();
        }
        for col in 1..=3 {
            board.set(crate::coord::Position::new('B', col), PieceColor::Black).unwrap();
        }
        assert_eq!(board.black_count, 8);
        assert_eq!(evaluate(&board, PieceColor::White), WIN_WEIGHT);
    }

    #[test]
    fn more_central_pieces_score_higher() {
        let mut central = Board::empty();
        central.set(crate::coord::Position::new('E', 5), PieceColor::Black).unwrap();
        let mut edge = Board::empty();
        edge.set(crate::coord::Position::new('A', 1), PieceColor::Black).unwrap();
        assert!(
            points_for_spaces_from_center(&central, PieceColor::Black)
                > points_for_spaces_from_center(&edge, PieceColor::Black)
        );
    }
}
