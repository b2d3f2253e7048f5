//! Legal move generation: groups of 1, 2, and 3 marbles, each tested for an
//! inline sumito/empty destination or a sidestep, with permutation
//! de-duplication.

use std::collections::HashSet;

use crate::board::{Board, PieceColor};
use crate::coord::{self, Direction, Index, Position};

/// A single legal move: the marbles being moved (in discovery order, not
/// normalized) and the direction they move in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub marbles: Vec<Position>,
    pub dir: Direction,
}

impl Move {
    fn canonical_key(&self) -> (Vec<Position>, Direction) {
        let mut sorted = self.marbles.clone();
        sorted.sort_by_key(|p| (p.row, p.col));
        (sorted, self.dir)
    }

    /// Builds a [`MoveRecord`] for history display: this move's sources plus
    /// the destination each source marble steps to. Not used by the search
    /// or the generator themselves.
    pub fn to_record(&self) -> MoveRecord {
        let destinations = self
            .marbles
            .iter()
            .map(|&pos| {
                let idx = coord::to_index(pos).expect("a generated move's source is always a valid position");
                coord::to_position(coord::apply_direction(idx, self.dir))
            })
            .collect();
        MoveRecord {
            sources: self.marbles.clone(),
            dir: self.dir,
            destinations,
        }
    }
}

/// A move as the (out-of-scope) GUI history display would render it: where
/// the marbles came from, which direction they moved, and where they ended
/// up. The core produces these but never reads them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub sources: Vec<Position>,
    pub dir: Direction,
    pub destinations: Vec<Position>,
}

fn own_cells(board: &Board, color: PieceColor) -> Vec<Index> {
    let mut cells = Vec::new();
    for r in 0..board.rows() {
        for c in 0..board.row_len(r) {
            if board.get_raw((r as i32, c as i32)) == color {
                cells.push((r as i32, c as i32));
            }
        }
    }
    cells
}

fn adjacent_of_color(board: &Board, index: Index, dir: Direction, color: PieceColor) -> Option<Index> {
    let adj = coord::apply_direction(index, dir);
    if coord::in_bounds(adj) && board.get_raw(adj) == color {
        Some(adj)
    } else {
        None
    }
}

/// Every contiguous same-color triple, as `(first, second, third)` internal
/// indices in discovery order, de-duplicated under permutation.
pub fn find_triples(board: &Board, color: PieceColor) -> Vec<(Index, Index, Index)> {
    let mut triples = Vec::new();
    let mut seen: HashSet<[Index; 3]> = HashSet::new();
    for piece in own_cells(board, color) {
        for dir in Direction::ALL {
            if let Some(second) = adjacent_of_color(board, piece, dir, color) {
                if let Some(third) = adjacent_of_color(board, second, dir, color) {
                    let mut key = [piece, second, third];
                    key.sort();
                    if seen.insert(key) {
                        triples.push((piece, second, third));
                    }
                }
            }
        }
    }
    triples
}

/// Every adjacent same-color pair, de-duplicated under permutation.
pub fn find_doubles(board: &Board, color: PieceColor) -> Vec<(Index, Index)> {
    let mut doubles = Vec::new();
    let mut seen: HashSet<[Index; 2]> = HashSet::new();
    for piece in own_cells(board, color) {
        for dir in Direction::ALL {
            if let Some(second) = adjacent_of_color(board, piece, dir, color) {
                let mut key = [piece, second];
                key.sort();
                if seen.insert(key) {
                    doubles.push((piece, second));
                }
            }
        }
    }
    doubles
}

/// The frontmost destination of an inline group: the one step target that
/// does not land back inside the group itself.
fn leading_destination(marbles: &[Index], dir: Direction) -> Index {
    for &m in marbles {
        let stepped = coord::apply_direction(m, dir);
        if !marbles.contains(&stepped) {
            return stepped;
        }
    }
    // Unreachable for a well-formed inline group of 2 or 3 marbles.
    coord::apply_direction(marbles[0], dir)
}

fn is_sumito(board: &Board, color: PieceColor, marbles: &[Index], dir: Direction) -> bool {
    let enemy = color.opponent();
    let power = marbles.len();
    let head = leading_destination(marbles, dir);

    if !coord::in_bounds(head) || board.get_raw(head) != enemy {
        return false;
    }

    let mut enemy_count = 1;
    let mut search = head;
    loop {
        search = coord::apply_direction(search, dir);
        if !coord::in_bounds(search) {
            break;
        }
        let at = board.get_raw(search);
        if at == enemy {
            enemy_count += 1;
        } else if at == color {
            return false;
        } else {
            break;
        }
    }

    enemy_count < power
}

fn is_empty_ahead(board: &Board, marbles: &[Index], dir: Direction) -> bool {
    let head = leading_destination(marbles, dir);
    coord::in_bounds(head) && board.get_raw(head) == PieceColor::Empty
}

fn check_valid_sidestep(board: &Board, marbles: &[Index], dir: Direction) -> bool {
    marbles.iter().all(|&m| {
        let dest = coord::apply_direction(m, dir);
        coord::in_bounds(dest) && board.get_raw(dest) == PieceColor::Empty
    })
}

fn to_positions(marbles: &[Index]) -> Vec<Position> {
    marbles.iter().map(|&m| coord::to_position(m)).collect()
}

/// All legal moves for groups of three.
pub fn find_three_piece_moves(
    board: &Board,
    color: PieceColor,
    groups: &[(Index, Index, Index)],
) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut seen = HashSet::new();
    for &(a, b, c) in groups {
        let marbles = [a, b, c];
        for dir in Direction::ALL {
            let legal = if coord::is_inline(a, b, dir) {
                is_empty_ahead(board, &marbles, dir) || is_sumito(board, color, &marbles, dir)
            } else {
                check_valid_sidestep(board, &marbles, dir)
            };
            if legal {
                let mv = Move {
                    marbles: to_positions(&marbles),
                    dir,
                };
                if seen.insert(mv.canonical_key()) {
                    moves.push(mv);
                }
            }
        }
    }
    moves
}

/// All legal moves for groups of two.
pub fn find_two_piece_moves(board: &Board, color: PieceColor, groups: &[(Index, Index)]) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut seen = HashSet::new();
    for &(a, b) in groups {
        let marbles = [a, b];
        for dir in Direction::ALL {
            let legal = if coord::is_inline(a, b, dir) {
                is_empty_ahead(board, &marbles, dir) || is_sumito(board, color, &marbles, dir)
            } else {
                check_valid_sidestep(board, &marbles, dir)
            };
            if legal {
                let mv = Move {
                    marbles: to_positions(&marbles),
                    dir,
                };
                if seen.insert(mv.canonical_key()) {
                    moves.push(mv);
                }
            }
        }
    }
    moves
}

/// All legal single-marble moves.
pub fn find_single_piece_moves(board: &Board, color: PieceColor) -> Vec<Move> {
    let mut moves = Vec::new();
    for piece in own_cells(board, color) {
        for dir in Direction::ALL {
            let dest = coord::apply_direction(piece, dir);
            if coord::in_bounds(dest) && board.get_raw(dest) == PieceColor::Empty {
                moves.push(Move {
                    marbles: vec![coord::to_position(piece)],
                    dir,
                });
            }
        }
    }
    moves
}

/// All legal moves for `color` on `board`, in the historical generation
/// order: three-marble moves, then single-marble moves, then two-marble
/// moves.
pub fn generate_all_legal_moves(board: &Board, color: PieceColor) -> Vec<Move> {
    let mut moves = Vec::new();

    let triples = find_triples(board, color);
    moves.extend(find_three_piece_moves(board, color, &triples));

    moves.extend(find_single_piece_moves(board, color));

    let doubles = find_doubles(board, color);
    moves.extend(find_two_piece_moves(board, color, &doubles));

    moves
}
