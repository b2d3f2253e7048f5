//! The hex-grid board: piece storage, named starting layouts, and validated
//! move application (single-marble moves, inline sumito pushes, sidesteps).

use log::{debug, trace};

use crate::coord::{self, Direction, Index, Position, ROW_LENGTHS};
use crate::error::AbaloneError;

/// What, if anything, occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    White,
    Black,
    Empty,
}

impl PieceColor {
    pub fn opponent(self) -> PieceColor {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
            PieceColor::Empty => PieceColor::Empty,
        }
    }
}

/// The 9-row jagged hex board plus marble counters.
///
/// Rows are stored top-down in internal index order (row 0 is I, row 8 is
/// A, see [`crate::coord`]); row lengths follow [`ROW_LENGTHS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Vec<PieceColor>>,
    pub white_count: u32,
    pub black_count: u32,
}

fn empty_rows() -> Vec<Vec<PieceColor>> {
    ROW_LENGTHS.iter().map(|&len| vec![PieceColor::Empty; len]).collect()
}

impl Board {
    /// An empty board.
    pub fn empty() -> Self {
        Board {
            tiles: empty_rows(),
            white_count: 0,
            black_count: 0,
        }
    }

    /// The standard Abalone opening layout.
    pub fn default_layout() -> Self {
        Board::from_rows(&DEFAULT_LAYOUT)
    }

    /// The "Belgian Daisy" opening layout.
    pub fn belgian_daisy() -> Self {
        Board::from_rows(&BELGIAN_DAISY_LAYOUT)
    }

    /// The "German Daisy" opening layout.
    pub fn german_daisy() -> Self {
        Board::from_rows(&GERMAN_DAISY_LAYOUT)
    }

    fn from_rows(rows: &[&[PieceColor]]) -> Self {
        let mut tiles = Vec::with_capacity(9);
        let mut white_count = 0;
        let mut black_count = 0;
        for row in rows {
            let mut owned = Vec::with_capacity(row.len());
            for &cell in row.iter() {
                match cell {
                    PieceColor::White => white_count += 1,
                    PieceColor::Black => black_count += 1,
                    PieceColor::Empty => {}
                }
                owned.push(cell);
            }
            tiles.push(owned);
        }
        Board {
            tiles,
            white_count,
            black_count,
        }
    }

    /// Row count, always 9.
    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    pub fn row_len(&self, r: usize) -> usize {
        self.tiles[r].len()
    }

    /// Reads the color at an external coordinate.
    pub fn get(&self, pos: Position) -> Result<PieceColor, AbaloneError> {
        let idx = coord::to_index(pos)?;
        Ok(self.get_raw(idx))
    }

    /// Reads the color at an internal index. Panics if out of bounds --
    /// callers that might pass an off-board index should check
    /// [`coord::in_bounds`] first.
    pub fn get_raw(&self, index: Index) -> PieceColor {
        self.tiles[index.0 as usize][index.1 as usize]
    }

    /// Writes the color at an external coordinate, adjusting counters for
    /// the cell that was overwritten.
    pub fn set(&mut self, pos: Position, color: PieceColor) -> Result<(), AbaloneError> {
        let idx = coord::to_index(pos)?;
        self.set_raw(idx, color);
        Ok(())
    }

    fn set_raw(&mut self, index: Index, color: PieceColor) {
        let prev = self.get_raw(index);
        self.adjust_count(prev, -1);
        self.adjust_count(color, 1);
        self.tiles[index.0 as usize][index.1 as usize] = color;
    }

    fn adjust_count(&mut self, color: PieceColor, delta: i32) {
        match color {
            PieceColor::White => self.white_count = (self.white_count as i32 + delta).max(0) as u32,
            PieceColor::Black => self.black_count = (self.black_count as i32 + delta).max(0) as u32,
            PieceColor::Empty => {}
        }
    }

    pub fn clear(&mut self) {
        self.tiles = empty_rows();
        self.white_count = 0;
        self.black_count = 0;
    }

    /// The winning color, if either side has been reduced to 8 marbles or
    /// fewer.
    pub fn winner(&self) -> Option<PieceColor> {
        if self.black_count <= 8 {
            Some(PieceColor::White)
        } else if self.white_count <= 8 {
            Some(PieceColor::Black)
        } else {
            None
        }
    }

    /// Applies a move to the board: 1, 2, or 3 marbles of the same color,
    /// moved one step in `dir`. Returns the color of a marble pushed off
    /// the board, if a sumito resulted in a push-off.
    ///
    /// See the crate's design notes for the full semantics of inline
    /// sumito pushes versus sidesteps.
    pub fn move_pieces(
        &mut self,
        dir: Direction,
        marbles: &[Position],
    ) -> Result<Option<PieceColor>, AbaloneError> {
        debug!("move_pieces: {} marble(s) {dir:?}", marbles.len());
        let indices: Result<Vec<Index>, AbaloneError> =
            marbles.iter().map(|&p| coord::to_index(p)).collect();
        let indices = indices?;
        self.move_indices(dir, &indices, false)
    }

    fn move_indices(
        &mut self,
        dir: Direction,
        marbles: &[Index],
        is_push: bool,
    ) -> Result<Option<PieceColor>, AbaloneError> {
        match marbles.len() {
            0 => Err(AbaloneError::invalid_parameter("no marbles selected")),
            1 => self.move_single(dir, marbles[0], is_push),
            2 | 3 => self.move_column(dir, marbles, is_push),
            n => Err(AbaloneError::invalid_parameter(format!(
                "cannot move {n} marbles at once"
            ))),
        }
    }

    fn move_single(
        &mut self,
        dir: Direction,
        index: Index,
        is_push: bool,
    ) -> Result<Option<PieceColor>, AbaloneError> {
        let new_index = coord::apply_direction(index, dir);
        let piece = self.get_raw(index);

        if !coord::in_bounds(new_index) {
            if !is_push {
                return Err(AbaloneError::cannot_move("single marble move would leave the board"));
            }
            self.set_raw(index, PieceColor::Empty);
            return Ok(Some(piece));
        }

        if self.get_raw(new_index) != PieceColor::Empty {
            return Err(AbaloneError::cannot_move("destination is occupied"));
        }

        self.set_raw(index, PieceColor::Empty);
        self.set_raw(new_index, piece);
        Ok(None)
    }

    fn move_column(
        &mut self,
        dir: Direction,
        marbles: &[Index],
        is_push: bool,
    ) -> Result<Option<PieceColor>, AbaloneError> {
        let piece = self.get_raw(marbles[0]);
        let new_indices: Vec<Index> = marbles.iter().map(|&m| coord::apply_direction(m, dir)).collect();

        let mut to_sumito: Vec<Index> = Vec::new();

        if coord::is_inline(marbles[0], marbles[1], dir) {
            if !is_push {
                let enemy = piece.opponent();
                let mut valid = false;
                for &dest in &new_indices {
                    if valid {
                        break;
                    }
                    if !coord::in_bounds(dest) {
                        // A marble cannot walk itself off the board --
                        // only a pushed enemy marble may leave via sumito.
                        // Skip this destination the same way an
                        // already-occupied ally cell is skipped below.
                        continue;
                    }
                    let dest_color = self.get_raw(dest);
                    if dest_color == enemy {
                        to_sumito = self.calculate_sumito(dest, dir, enemy, marbles.len())?;
                        valid = true;
                    } else if dest_color == PieceColor::Empty {
                        valid = true;
                    }
                }
                if !valid {
                    return Err(AbaloneError::cannot_move("cannot push an ally marble"));
                }
            }
        } else {
            for &dest in &new_indices {
                if !coord::in_bounds(dest) || self.get_raw(dest) != PieceColor::Empty {
                    return Err(AbaloneError::cannot_move("marble in the way of sidestep"));
                }
            }
        }

        let mut pushed_off = None;
        if !to_sumito.is_empty() {
            trace!("sumito: pushing {} enemy marble(s)", to_sumito.len());
            pushed_off = self.move_indices(dir, &to_sumito, true)?;
        }

        for &index in marbles {
            self.set_raw(index, PieceColor::Empty);
        }
        for &dest in &new_indices {
            if !coord::in_bounds(dest) {
                if pushed_off.is_none() {
                    pushed_off = Some(piece);
                }
                // The ally marble itself left the board -- only possible
                // while being pushed by a larger enemy group. Its count was
                // already decremented when it was cleared from `index` above.
            } else {
                self.set_raw(dest, piece);
            }
        }

        if let Some(color) = pushed_off {
            trace!("sumito: {color:?} marble pushed off the board");
        }

        Ok(pushed_off)
    }

    /// Walks forward from `head` (the first enemy cell found ahead of the
    /// moving column) collecting consecutive enemy marbles. Fails if a
    /// sandwiched ally marble is found, or if there are at least as many
    /// enemy marbles as the pushing column's size.
    fn calculate_sumito(
        &self,
        head: Index,
        dir: Direction,
        enemy: PieceColor,
        power: usize,
    ) -> Result<Vec<Index>, AbaloneError> {
        let ally = enemy.opponent();
        let mut marbles_to_push = vec![head];
        let mut search = head;
        loop {
            search = coord::apply_direction(search, dir);
            if !coord::in_bounds(search) {
                break;
            }
            let at = self.get_raw(search);
            if at == enemy {
                marbles_to_push.push(search);
            } else if at == ally {
                return Err(AbaloneError::cannot_move("cannot push a sandwiched ally marble"));
            } else {
                break;
            }
        }

        if marbles_to_push.len() >= power {
            return Err(AbaloneError::cannot_move(
                "cannot push more marbles than the column's power",
            ));
        }

        Ok(marbles_to_push)
    }
}

use PieceColor::Black as B;
use PieceColor::Empty as E;
use PieceColor::White as W;

#[rustfmt::skip]
const DEFAULT_LAYOUT: [&[PieceColor]; 9] = [
    &[W, W, W, W, W],
    &[W, W, W, W, W, W],
    &[E, E, W, W, W, E, E],
    &[E, E, E, E, E, E, E, E],
    &[E, E, E, E, E, E, E, E, E],
    &[E, E, E, E, E, E, E, E],
    &[E, E, B, B, B, E, E],
    &[B, B, B, B, B, B],
    &[B, B, B, B, B],
];

#[rustfmt::skip]
const BELGIAN_DAISY_LAYOUT: [&[PieceColor]; 9] = [
    &[W, W, E, B, B],
    &[W, W, W, B, B, B],
    &[E, W, W, E, B, B, E],
    &[E, E, E, E, E, E, E, E],
    &[E, E, E, E, E, E, E, E, E],
    &[E, E, E, E, E, E, E, E],
    &[E, B, B, E, W, W, E],
    &[B, B, B, W, W, W],
    &[B, B, E, W, W],
];

#[rustfmt::skip]
const GERMAN_DAISY_LAYOUT: [&[PieceColor]; 9] = [
    &[E, E, E, E, E],
    &[W, W, E, E, B, B],
    &[W, W, W, E, B, B, B],
    &[E, W, W, E, E, B, B, E],
    &[E, E, E, E, E, E, E, E, E],
    &[E, B, B, E, E, W, W, E],
    &[B, B, B, E, W, W, W],
    &[B, B, E, E, W, W],
    &[E, E, E, E, E],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_has_fourteen_each() {
        let board = Board::default_layout();
        assert_eq!(board.white_count, 14);
        assert_eq!(board.black_count, 14);
    }

    #[test]
    fn belgian_daisy_has_fourteen_each() {
        let board = Board::belgian_daisy();
        assert_eq!(board.white_count, 14);
        assert_eq!(board.black_count, 14);
    }

    #[test]
    fn german_daisy_has_fourteen_each() {
        let board = Board::german_daisy();
        assert_eq!(board.white_count, 14);
        assert_eq!(board.black_count, 14);
    }

    #[test]
    fn single_marble_push_to_empty() {
        let mut board = Board::empty();
        board.set(Position::new('D', 5), PieceColor::Black).unwrap();
        board.move_pieces(Direction::UpLeft, &[Position::new('D', 5)]).unwrap();
        assert_eq!(board.get(Position::new('D', 5)).unwrap(), PieceColor::Empty);
        assert_eq!(board.get(Position::new('E', 5)).unwrap(), PieceColor::Black);
        assert_eq!(board.black_count, 1);
    }

    #[test]
    fn sumito_two_vs_one() {
        let mut board = Board::empty();
        board.set(Position::new('A', 1), PieceColor::Black).unwrap();
        board.set(Position::new('A', 2), PieceColor::Black).unwrap();
        board.set(Position::new('A', 3), PieceColor::White).unwrap();
        board
            .move_pieces(Direction::Right, &[Position::new('A', 1), Position::new('A', 2)])
            .unwrap();
        assert_eq!(board.get(Position::new('A', 2)).unwrap(), PieceColor::Black);
        assert_eq!(board.get(Position::new('A', 3)).unwrap(), PieceColor::Black);
        assert_eq!(board.get(Position::new('A', 4)).unwrap(), PieceColor::White);
        assert_eq!(board.black_count, 2);
        assert_eq!(board.white_count, 1);
    }

    #[test]
    fn sumito_two_vs_two_is_illegal() {
        let mut board = Board::empty();
        board.set(Position::new('A', 1), PieceColor::Black).unwrap();
        board.set(Position::new('A', 2), PieceColor::Black).unwrap();
        board.set(Position::new('A', 3), PieceColor::White).unwrap();
        board.set(Position::new('A', 4), PieceColor::White).unwrap();
        let result = board.move_pieces(Direction::Right, &[Position::new('A', 1), Position::new('A', 2)]);
        assert!(result.is_err());
    }

    #[test]
    fn sumito_push_off_board_edge() {
        // Three black marbles inline along the UpRight diagonal push a
        // lone white marble off the top edge of the board.
        let mut board = Board::empty();
        board.set(Position::new('F', 4), PieceColor::Black).unwrap();
        board.set(Position::new('G', 5), PieceColor::Black).unwrap();
        board.set(Position::new('H', 6), PieceColor::Black).unwrap();
        board.set(Position::new('I', 7), PieceColor::White).unwrap();

        let pushed = board
            .move_pieces(
                Direction::UpRight,
                &[Position::new('F', 4), Position::new('G', 5), Position::new('H', 6)],
            )
            .unwrap();

        assert_eq!(pushed, Some(PieceColor::White));
        assert_eq!(board.white_count, 0);
        assert_eq!(board.black_count, 3);
        assert_eq!(board.get(Position::new('F', 4)).unwrap(), PieceColor::Empty);
        assert_eq!(board.get(Position::new('G', 5)).unwrap(), PieceColor::Black);
        assert_eq!(board.get(Position::new('H', 6)).unwrap(), PieceColor::Black);
        assert_eq!(board.get(Position::new('I', 7)).unwrap(), PieceColor::Black);
    }

    #[test]
    fn sidestep_moves_a_row() {
        let mut board = Board::empty();
        board.set(Position::new('A', 1), PieceColor::Black).unwrap();
        board.set(Position::new('A', 2), PieceColor::Black).unwrap();
        board.set(Position::new('A', 3), PieceColor::Black).unwrap();
        board
            .move_pieces(
                Direction::UpLeft,
                &[Position::new('A', 1), Position::new('A', 2), Position::new('A', 3)],
            )
            .unwrap();
        assert_eq!(board.get(Position::new('B', 1)).unwrap(), PieceColor::Black);
        assert_eq!(board.get(Position::new('B', 2)).unwrap(), PieceColor::Black);
        assert_eq!(board.get(Position::new('B', 3)).unwrap(), PieceColor::Black);
        assert_eq!(board.get(Position::new('A', 1)).unwrap(), PieceColor::Empty);
    }
}
