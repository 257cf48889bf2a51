//! Static evaluation of non-terminal positions.
//!
//! The heuristic is a mobility difference: it compares how many one-hop
//! captures each side could start from the current board. Chains are not
//! followed; a run of three jumps counts the same as a single jump.

use crate::board::{Board, Color};
use crate::constants::{DIRECTIONS, N};
use crate::position::State;

/// Count one-hop capture opportunities for `color`.
///
/// One point per (piece, direction) where the adjacent cell holds an opponent
/// piece and the cell beyond it is empty.
pub fn mobility(board: &Board, color: Color) -> i32 {
    let opp = color.opponent();
    let mut count = 0;
    for row in 0..N {
        for col in 0..N {
            if board.get((row, col)) != Some(color) {
                continue;
            }
            for dir in DIRECTIONS {
                let over = Board::offset((row, col), dir, 1);
                let land = Board::offset((row, col), dir, 2);
                if let (Some(over), Some(land)) = (over, land) {
                    if board.get(over) == Some(opp) && board.is_empty_at(land) {
                        count += 1;
                    }
                }
            }
        }
    }
    count
}

/// Heuristic value of a position: the waiting side's mobility minus the
/// mobility of the side to move.
pub fn eval(state: &State) -> i32 {
    let board = state.board();
    let player = state.player();
    mobility(board, player.opponent()) - mobility(board, player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_board_is_balanced() {
        let state = State::initial(Board::standard());
        assert_eq!(mobility(state.board(), Color::Black), 0);
        assert_eq!(mobility(state.board(), Color::White), 0);
        assert_eq!(eval(&state), 0);
    }

    #[test]
    fn test_counts_one_hop_only() {
        let mut board = Board::empty();
        // B W O W O on row 2: one opportunity for Black even though the run is two long.
        board.set((2, 2), Some(Color::Black));
        board.set((2, 3), Some(Color::White));
        board.set((2, 5), Some(Color::White));
        assert_eq!(mobility(&board, Color::Black), 1);
        // White at (2,3) can jump back over (2,2) into (2,1).
        assert_eq!(mobility(&board, Color::White), 1);
    }

    #[test]
    fn test_eval_sign_follows_side_to_move() {
        let mut board = Board::empty();
        board.set((0, 0), Some(Color::Black));
        board.set((0, 1), Some(Color::White));
        board.set((1, 0), Some(Color::White));
        // Black has two openings, White none.
        assert_eq!(mobility(&board, Color::Black), 2);
        assert_eq!(mobility(&board, Color::White), 0);
        assert_eq!(eval(&State::new(board, Color::Black)), -2);
        assert_eq!(eval(&State::new(board, Color::White)), 2);
    }
}
