//! Konane: a two-player capturing game on an 8x8 board, with a
//! resource-bounded alpha-beta engine.
//!
//! Players take turns jumping one of their pieces over an adjacent opponent
//! piece into an empty cell, capturing it. A jump may continue in a straight
//! line over further opponent pieces. The first player who cannot capture
//! loses.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, file symbols, and default search budgets
//! - [`board`] - Board cells, layout parsing, and rendering
//! - [`position`] - Game state, moves, transitions, opening rules, and notation
//! - [`movegen`] - Legal capture generation
//! - [`eval`] - Mobility heuristic
//! - [`search`] - Alpha-beta search under depth, time, and memory budgets
//! - [`game`] - Turn loop for human and computer players
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use konane::board::Board;
//! use konane::position::{Move, State, apply_opening, apply_reply};
//! use konane::search::{Decision, SearchContext, SearchLimits, decide};
//!
//! // Open the standard board: Black clears D5, White clears E5.
//! let state = State::initial(Board::standard());
//! let state = apply_opening(&state, &Move::removal((3, 3))).unwrap();
//! let state = apply_reply(&state, &Move::removal((3, 4))).unwrap();
//!
//! // Let the engine pick Black's first capture.
//! let mut ctx = SearchContext::new(SearchLimits::default().with_max_depth(4));
//! ctx.start_turn();
//! match decide(&state, &mut ctx).unwrap() {
//!     Decision::Play(mv) => println!("Best move: {mv}"),
//!     Decision::NoLegalMove => println!("Black has no capture"),
//! }
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod position;
pub mod search;
