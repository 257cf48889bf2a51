//! Error types for the Konane engine.

use std::io;
use std::path::PathBuf;

use crate::position::Move;

/// Errors surfaced by board loading, move input, and game play.
#[derive(thiserror::Error, Debug)]
pub enum KonaneError {
    /// Move text is missing a letter or number, or names a cell off the board
    #[error("invalid move input: {0:?}")]
    InvalidMoveInput(String),

    /// A well-formed move that is not legal in the current position
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    /// The board file could not be opened
    #[error("could not open file {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The board file was read but its layout is not an 8x8 grid of B/W/O
    #[error("malformed board: {0}")]
    BoardFormat(String),

    /// The search returned without a move for a position that has legal moves
    #[error("search produced no decision for a non-terminal position")]
    NoDecision,

    /// No piece may be removed on the opening or reply ply
    #[error("no removable piece for {0}")]
    NoRemovablePiece(crate::board::Color),

    /// Interactive input ended before the game finished
    #[error("input closed")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type for Konane operations.
pub type Result<T> = std::result::Result<T, KonaneError>;
