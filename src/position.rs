//! Konane positions, moves, and the transition model.
//!
//! This module provides the core game logic outside of move generation:
//! - [`State`]: an immutable board snapshot plus the side to move
//! - [`Move`]: a straight-line run from a start cell to an end cell
//! - [`result`] / [`validate`]: applying and checking capture moves
//! - The two special opening plies, which remove a single piece
//! - Text notation for cells and moves (`D5`, `D5 - F5`)

use std::fmt;

use crate::board::{Board, Color, Point};
use crate::constants::{N, OPENING_CELLS};
use crate::error::{KonaneError, Result};
use crate::movegen::actions;

/// A move from `start` to `end` along a single row or column.
///
/// A move with `start == end` is a removal, used only on the two opening plies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub start: Point,
    pub end: Point,
}

impl Move {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// A removal of the piece at `cell`.
    pub const fn removal(cell: Point) -> Self {
        Self {
            start: cell,
            end: cell,
        }
    }

    #[inline]
    pub fn is_removal(&self) -> bool {
        self.start == self.end
    }

    /// Number of cells between start and end, counting the end cell.
    pub fn distance(&self) -> usize {
        self.start.0.abs_diff(self.end.0) + self.start.1.abs_diff(self.end.1)
    }

    /// Number of opponent pieces jumped by a capture move.
    pub fn captures(&self) -> usize {
        self.distance() / 2
    }

    /// Cells from `start` (inclusive) to `end` (exclusive).
    ///
    /// Empty for removals. Assumes the move lies on a row or column.
    pub fn path(&self) -> impl Iterator<Item = Point> {
        let dr = (self.end.0 as isize - self.start.0 as isize).signum();
        let dc = (self.end.1 as isize - self.start.1 as isize).signum();
        let start = self.start;
        (0..self.distance() as isize).filter_map(move |i| Board::offset(start, (dr, dc), i))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_removal() {
            write!(f, "{}", str_coord(self.start))
        } else {
            write!(f, "{} - {}", str_coord(self.start), str_coord(self.end))
        }
    }
}

/// A game state: board contents and the side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct State {
    board: Board,
    player: Color,
}

impl State {
    pub fn new(board: Board, player: Color) -> Self {
        Self { board, player }
    }

    /// The state a game starts from: Black moves first.
    pub fn initial(board: Board) -> Self {
        Self::new(board, Color::Black)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn player(&self) -> Color {
        self.player
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        write!(f, "{}", self.board)?;
        writeln!(f)?;
        writeln!(f, "Current Player: {}", self.player)
    }
}

/// Check that `mv` is one of the legal capture moves in `state`.
pub fn validate(state: &State, mv: &Move) -> bool {
    actions(state).contains(mv)
}

/// Apply a capture move, returning the successor state.
///
/// # Errors
/// [`KonaneError::IllegalMove`] if `mv` is not in [`actions`] for `state`.
pub fn result(state: &State, mv: &Move) -> Result<State> {
    if !validate(state, mv) {
        return Err(KonaneError::IllegalMove(*mv));
    }
    Ok(apply(state, mv))
}

/// Apply a move already known to be legal.
///
/// Clears the origin and every jumped cell, then lands the mover's piece.
pub(crate) fn apply(state: &State, mv: &Move) -> State {
    let mut board = state.board;
    for pt in mv.path() {
        board.set(pt, None);
    }
    board.set(mv.end, Some(state.player));
    State::new(board, state.player.opponent())
}

/// Blank a single cell and pass the turn.
fn remove_piece(state: &State, cell: Point) -> State {
    let mut board = state.board;
    board.set(cell, None);
    State::new(board, state.player.opponent())
}

// =============================================================================
// Opening Plies
// =============================================================================

/// Check the opening ply: the mover removes one of their own pieces from a
/// center cell or a corner.
pub fn validate_first_in_move(state: &State, mv: &Move) -> bool {
    mv.is_removal()
        && OPENING_CELLS.contains(&mv.start)
        && state.board.get(mv.start) == Some(state.player)
}

/// Locate the empty cell left by the opening ply.
///
/// Scans in row-major order and keeps the last empty cell found; the board is
/// expected to hold exactly one.
pub fn find_empty(board: &Board) -> Option<Point> {
    board.empty_cells().last()
}

/// Cells the mover may clear on the reply ply: their own pieces orthogonally
/// adjacent to the empty cell.
pub fn reply_candidates(state: &State) -> Vec<Point> {
    let Some(empty) = find_empty(&state.board) else {
        return Vec::new();
    };
    Board::neighbors(empty)
        .filter(|&pt| state.board.get(pt) == Some(state.player))
        .collect()
}

/// Check the reply ply: the mover removes one of their own pieces next to the
/// cell cleared by the opening ply.
pub fn validate_second_in_move(state: &State, mv: &Move) -> bool {
    mv.is_removal() && reply_candidates(state).contains(&mv.start)
}

/// Apply the opening ply.
///
/// # Errors
/// [`KonaneError::IllegalMove`] if [`validate_first_in_move`] rejects `mv`.
pub fn apply_opening(state: &State, mv: &Move) -> Result<State> {
    if !validate_first_in_move(state, mv) {
        return Err(KonaneError::IllegalMove(*mv));
    }
    Ok(remove_piece(state, mv.start))
}

/// Apply the reply ply.
///
/// # Errors
/// [`KonaneError::IllegalMove`] if [`validate_second_in_move`] rejects `mv`.
pub fn apply_reply(state: &State, mv: &Move) -> Result<State> {
    if !validate_second_in_move(state, mv) {
        return Err(KonaneError::IllegalMove(*mv));
    }
    Ok(remove_piece(state, mv.start))
}

// =============================================================================
// Notation
// =============================================================================

/// Convert a cell to its text form, e.g. `(3, 3)` to `"D5"`.
///
/// Columns are lettered `A..H` from the left; rows are numbered `8..1` from the top.
pub fn str_coord((row, col): Point) -> String {
    format!("{}{}", (b'A' + col as u8) as char, N - row)
}

fn cell_from_chars(letter: char, digit: char) -> Option<Point> {
    let col = (letter.to_ascii_uppercase() as u32).checked_sub('A' as u32)? as usize;
    let rank = digit.to_digit(10)? as usize;
    if col >= N || rank == 0 || rank > N {
        return None;
    }
    Some((N - rank, col))
}

/// Pull `count` cells out of free-form text: each cell is the next letter
/// followed by the next digit after it.
fn scan_cells(s: &str, count: usize) -> Option<Vec<Point>> {
    let mut chars = s.chars();
    let mut cells = Vec::with_capacity(count);
    while cells.len() < count {
        let letter = chars.by_ref().find(|c| c.is_ascii_alphabetic())?;
        let digit = chars.by_ref().find(|c| c.is_ascii_digit())?;
        cells.push(cell_from_chars(letter, digit)?);
    }
    Some(cells)
}

/// Parse a single cell such as `"D5"`.
pub fn parse_coord(s: &str) -> Result<Point> {
    scan_cells(s, 1)
        .map(|cells| cells[0])
        .ok_or_else(|| KonaneError::InvalidMoveInput(s.trim().to_string()))
}

/// Parse a capture move such as `"D5 - F5"`.
pub fn parse_move(s: &str) -> Result<Move> {
    scan_cells(s, 2)
        .map(|cells| Move::new(cells[0], cells[1]))
        .ok_or_else(|| KonaneError::InvalidMoveInput(s.trim().to_string()))
}

/// Parse an opening or reply move, which names a single cell.
pub fn parse_removal(s: &str) -> Result<Move> {
    parse_coord(s).map(Move::removal)
}
