//! Constants for board geometry, file symbols, and search budgets.
//!
//! The search budgets here are only defaults: the engine reads them through
//! [`SearchLimits`](crate::search::SearchLimits), which the binary can
//! override from the command line.

use std::time::Duration;

use crate::board::Point;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Konane is played on a fixed 8x8 grid here.
pub const N: usize = 8;

/// Orthogonal unit steps as `(row, col)` deltas: right, left, down, up.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

// =============================================================================
// Board File Symbols
// =============================================================================

/// Black piece.
pub const SYMBOL_BLACK: char = 'B';

/// White piece.
pub const SYMBOL_WHITE: char = 'W';

/// Empty cell.
pub const SYMBOL_EMPTY: char = 'O';

// =============================================================================
// Opening
// =============================================================================

/// Cells the first player may clear on the opening ply: the four center
/// cells, then the four corners.
pub const OPENING_CELLS: [Point; 8] = [
    (3, 3),
    (3, 4),
    (4, 3),
    (4, 4),
    (0, 0),
    (0, N - 1),
    (N - 1, 0),
    (N - 1, N - 1),
];

// =============================================================================
// Search Budgets
// =============================================================================

/// Maximum search depth in plies. Nodes deeper than this are evaluated statically.
pub const MAX_DEPTH: usize = 15;

/// Wall-clock thinking time allotted to the computer per turn, in seconds.
pub const THINKING_TIME_SECS: u64 = 10;

/// Safety margin kept back from the thinking time, in seconds.
pub const SAFETY_MARGIN_SECS: u64 = 1;

/// Time after which the search stops expanding nodes.
pub const TIME_BUDGET: Duration = Duration::from_secs(THINKING_TIME_SECS - SAFETY_MARGIN_SECS);

/// Bytes the search tree may hold before expansion stops.
pub const MEMORY_BUDGET: usize = 1_000_000;
