//! Board-string encoding (used for transposition keys and scenario files)
//! and scenario file I/O: a two-line format giving the side to move and the
//! board configuration.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::board::{Board, PieceColor};
use crate::coord::{self, Direction, Position};
use crate::error::AbaloneError;

/// `'w'` or `'b'`, as used by the transposition key and scenario files.
/// `Empty` has no letter and should never reach this function.
pub fn side_letter(color: PieceColor) -> char {
    match color {
        PieceColor::White => 'w',
        PieceColor::Black => 'b',
        PieceColor::Empty => panic!("Empty has no side letter"),
    }
}

fn side_from_letter(c: char) -> Result<PieceColor, AbaloneError> {
    match c {
        'w' | 'W' => Ok(PieceColor::White),
        'b' | 'B' => Ok(PieceColor::Black),
        _ => Err(AbaloneError::invalid_parameter(format!("unknown side letter: {c}"))),
    }
}

/// Encodes a board as a comma-separated list of `<coord><color>` tokens,
/// black pieces first then white, each color group listed row by row from
/// row I down to row A and left to right within a row.
pub fn encode_board(board: &Board) -> String {
    let mut black = String::new();
    let mut white = String::new();

    for r in 0..board.rows() {
        for c in 0..board.row_len(r) {
            let color = board.get_raw((r as i32, c as i32));
            if color == PieceColor::Empty {
                continue;
            }
            let pos = coord::to_position((r as i32, c as i32));
            let token = format!("{pos}{}", side_letter(color));
            match color {
                PieceColor::Black => {
                    black.push_str(&token);
                    black.push(',');
                }
                PieceColor::White => {
                    white.push_str(&token);
                    white.push(',');
                }
                PieceColor::Empty => unreachable!(),
            }
        }
    }

    let mut combined = black;
    combined.push_str(&white);
    combined.pop(); // trailing comma
    combined
}

/// Parses a board configuration string as produced by [`encode_board`].
/// Token order within the string does not matter.
pub fn decode_board(s: &str) -> Result<Board, AbaloneError> {
    let mut board = Board::empty();
    if s.trim().is_empty() {
        return Ok(board);
    }
    for token in s.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let (coord_part, color_part) = token.split_at(token.len() - 1);
        let color = side_from_letter(
            color_part
                .chars()
                .next()
                .ok_or_else(|| AbaloneError::invalid_parameter(format!("empty token: {token:?}")))?,
        )?;
        let pos = Position::parse(coord_part)?;
        board.set(pos, color)?;
    }
    Ok(board)
}

/// Reads a scenario file: first line is `w` or `b` (the side to move),
/// second line is a board configuration string.
pub fn read_scenario(path: impl AsRef<Path>) -> Result<(PieceColor, Board), AbaloneError> {
    let text = fs::read_to_string(path.as_ref())
        .map_err(|e| AbaloneError::invalid_parameter(format!("cannot read scenario file: {e}")))?;
    let mut lines = text.lines();
    let side_line = lines
        .next()
        .ok_or_else(|| AbaloneError::invalid_parameter("scenario file is missing the side-to-move line"))?;
    let side_char = side_line
        .trim()
        .chars()
        .next()
        .ok_or_else(|| AbaloneError::invalid_parameter("scenario file's side-to-move line is empty"))?;
    let team = side_from_letter(side_char)?;

    let board_line = lines
        .next()
        .ok_or_else(|| AbaloneError::invalid_parameter("scenario file is missing the board configuration line"))?;
    let board = decode_board(board_line.trim())?;

    Ok((team, board))
}

/// Writes one move as its source positions followed by the direction's
/// `(Δrow, Δcol)` vector, e.g. `E5 E6 -> (0, 1)`.
pub fn write_move(out: &mut impl Write, marbles: &[Position], dir: Direction) -> std::io::Result<()> {
    let (dy, dx) = dir.delta();
    let positions = marbles.iter().map(Position::to_string).collect::<Vec<_>>().join(" ");
    writeln!(out, "{positions} -> ({dy}, {dx})")
}

/// Writes a scenario file in the format read by [`read_scenario`].
pub fn write_scenario(path: impl AsRef<Path>, team: PieceColor, board: &Board) -> Result<(), AbaloneError> {
    let contents = format!("{}\n{}\n", side_letter(team), encode_board(board));
    fs::write(path.as_ref(), contents)
        .map_err(|e| AbaloneError::invalid_parameter(format!("cannot write scenario file: {e}")))
}
