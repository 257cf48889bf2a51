//! Legal move generation.
//!
//! A capture jumps an adjacent opponent piece and lands on the empty cell
//! beyond it. From that landing cell the same run may continue in the same
//! direction while the next two cells are again (opponent, empty). Every
//! prefix of a run is its own move, since a player may stop after any jump.
//! Runs never turn a corner.
//!
//! The edges are not symmetric: a run moving right or down may extend to the
//! last row or column, but a run moving left or up stops extending before row
//! or column 0. A single hop may still land on index 0.

use crate::board::{Board, Color, Point};
use crate::constants::{DIRECTIONS, N};
use crate::position::{Move, State};

/// All legal capture moves for the side to move.
///
/// The order follows the board scan and carries no meaning.
pub fn actions(state: &State) -> Vec<Move> {
    let board = state.board();
    let me = state.player();
    let mut moves = Vec::new();

    for row in 0..N {
        for col in 0..N {
            if board.get((row, col)) != Some(me) {
                continue;
            }
            for dir in DIRECTIONS {
                push_runs(board, (row, col), dir, me.opponent(), &mut moves);
            }
        }
    }
    moves
}

/// Append every prefix of the capture run starting at `start` along `dir`.
fn push_runs(board: &Board, start: Point, dir: (isize, isize), opp: Color, out: &mut Vec<Move>) {
    let mut hops: isize = 1;
    while let (Some(over), Some(land)) = (
        Board::offset(start, dir, 2 * hops - 1),
        Board::offset(start, dir, 2 * hops),
    ) {
        if board.get(over) != Some(opp) || !board.is_empty_at(land) {
            break;
        }
        if hops > 1 && lands_on_low_edge(land, dir) {
            break;
        }
        out.push(Move::new(start, land));
        hops += 1;
    }
}

/// Leftward and upward runs never extend onto row 0 or column 0. Only a
/// first hop may land there.
fn lands_on_low_edge(land: Point, dir: (isize, isize)) -> bool {
    (dir.0 < 0 && land.0 == 0) || (dir.1 < 0 && land.1 == 0)
}

/// A position is terminal when the side to move has no capture.
pub fn terminal_test(state: &State) -> bool {
    actions(state).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{apply_opening, apply_reply};

    fn row_state(cells: &str, row: usize, player: Color) -> State {
        let mut board = Board::empty();
        for (col, ch) in cells.chars().enumerate() {
            board.set((row, col), Color::from_symbol(ch));
        }
        State::new(board, player)
    }

    fn col_state(cells: &str, col: usize, player: Color) -> State {
        let mut board = Board::empty();
        for (row, ch) in cells.chars().enumerate() {
            board.set((row, col), Color::from_symbol(ch));
        }
        State::new(board, player)
    }

    fn sorted(mut moves: Vec<Move>) -> Vec<Move> {
        moves.sort_by_key(|m| (m.start, m.end));
        moves
    }

    #[test]
    fn test_single_hop() {
        let state = row_state("OOBWOOOO", 5, Color::Black);
        assert_eq!(actions(&state), vec![Move::new((5, 2), (5, 4))]);
    }

    #[test]
    fn test_run_yields_every_prefix() {
        let state = row_state("OOBWOWOO", 5, Color::Black);
        assert_eq!(
            sorted(actions(&state)),
            vec![Move::new((5, 2), (5, 4)), Move::new((5, 2), (5, 6))]
        );
    }

    #[test]
    fn test_runs_reach_the_high_edge() {
        let right = row_state("OBWOWOWO", 4, Color::Black);
        assert_eq!(
            sorted(actions(&right)),
            vec![
                Move::new((4, 1), (4, 3)),
                Move::new((4, 1), (4, 5)),
                Move::new((4, 1), (4, 7)),
            ]
        );

        let down = col_state("OBWOWOWO", 7, Color::Black);
        assert_eq!(
            sorted(actions(&down)),
            vec![
                Move::new((1, 7), (3, 7)),
                Move::new((1, 7), (5, 7)),
                Move::new((1, 7), (7, 7)),
            ]
        );
    }

    #[test]
    fn test_left_and_up_runs_stop_before_index_zero() {
        let left = row_state("OWOWOWBO", 0, Color::Black);
        assert_eq!(
            sorted(actions(&left)),
            vec![Move::new((0, 6), (0, 2)), Move::new((0, 6), (0, 4))]
        );

        let up = col_state("OWOWBOOO", 3, Color::Black);
        assert_eq!(actions(&up), vec![Move::new((4, 3), (2, 3))]);
    }

    #[test]
    fn test_single_hop_may_land_on_index_zero() {
        let left = row_state("OWBOOOOO", 6, Color::Black);
        assert_eq!(actions(&left), vec![Move::new((6, 2), (6, 0))]);

        let up = col_state("OWBOOOOO", 5, Color::White);
        assert_eq!(actions(&up), vec![Move::new((1, 5), (3, 5))]);
        let up = col_state("OWBOOOOO", 5, Color::Black);
        assert_eq!(actions(&up), vec![Move::new((2, 5), (0, 5))]);
    }

    #[test]
    fn test_run_stops_at_occupied_landing() {
        let state = row_state("BWOWWOOO", 2, Color::Black);
        assert_eq!(actions(&state), vec![Move::new((2, 0), (2, 2))]);
    }

    #[test]
    fn test_only_side_to_move_generates() {
        let state = row_state("OOBWOOOO", 5, Color::White);
        assert_eq!(actions(&state), vec![Move::new((5, 3), (5, 1))]);
        let blocked = row_state("BWOOOOOO", 5, Color::White);
        assert!(terminal_test(&blocked));
    }

    #[test]
    fn test_full_board_has_no_captures() {
        let state = State::initial(Board::standard());
        assert!(terminal_test(&state));
    }

    #[test]
    fn test_moves_after_opening() {
        let state = State::initial(Board::standard());
        let state = apply_opening(&state, &Move::removal((3, 3))).unwrap();
        let state = apply_reply(&state, &Move::removal((3, 4))).unwrap();
        // Only D5 can be reached: every cell two steps from E5 holds White.
        assert_eq!(
            sorted(actions(&state)),
            vec![
                Move::new((1, 3), (3, 3)),
                Move::new((3, 1), (3, 3)),
                Move::new((5, 3), (3, 3)),
            ]
        );
    }
}
