//! Integration tests for whole games driven through in-memory input and output.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use konane::board::{Board, Color};
use konane::error::KonaneError;
use konane::game::{Agent, Game};
use konane::search::SearchLimits;

// =============================================================================
// Helper functions
// =============================================================================

/// Write a board layout to a fresh file under the temp directory.
fn board_file(name: &str, rows: &[&str]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("konane-{}-{name}.txt", std::process::id()));
    fs::write(&path, rows.join("\n")).unwrap();
    path
}

fn scripted_game(
    board: Board,
    black: Agent,
    white: Agent,
    input: &str,
) -> Game<Cursor<String>, Vec<u8>> {
    Game::new(
        board,
        black,
        white,
        SearchLimits::default().with_max_depth(2),
        Cursor::new(input.to_string()),
        Vec::new(),
    )
}

// =============================================================================
// Full games
// =============================================================================

#[test]
fn test_computer_vs_computer_finishes() {
    for seed in [1, 2] {
        let mut game =
            scripted_game(Board::standard(), Agent::Computer, Agent::Computer, "").with_seed(seed);
        let winner = game.play().unwrap();

        // The side left to move has no capture and lost.
        assert_eq!(game.state().player(), winner.opponent());
        let text = String::from_utf8(game.into_output()).unwrap();
        assert!(text.contains("No moves left!..."));
        assert!(text.contains(&format!("{winner} wins!!!")));
        assert!(text.contains("Time taken:"));
        assert!(text.contains("Peak memory:"));
    }
}

#[test]
fn test_player_without_captures_loses_immediately() {
    // White's only piece sits next to the A8 corner, so the reply removes it.
    let path = board_file(
        "lone-white",
        &[
            "BWBBBBBB", "BBBBBBBB", "BBBBBBBB", "BBBBBBBB", "BBBBBBBB", "BBBBBBBB", "BBBBBBBB",
            "BBBBBBBB",
        ],
    );
    let board = Board::load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let mut game = scripted_game(board, Agent::Human, Agent::Human, "A8\nB8\n");
    assert_eq!(game.play().unwrap(), Color::White);
    assert_eq!(game.state().board().count(Color::White), 0);

    let text = String::from_utf8(game.into_output()).unwrap();
    assert!(text.contains("Move chosen: A8"));
    assert!(text.contains("Move chosen: B8"));
    assert!(text.ends_with("W wins!!!\n"));
}

#[test]
fn test_human_capture_reprompts_until_legal() {
    // D5 is empty after the opening, so the first capture is rejected.
    let input = "D5\nE5\nD5 - D7\nD7\nD7 - D5\n";
    let mut game = scripted_game(Board::standard(), Agent::Human, Agent::Human, input);
    assert!(matches!(game.play(), Err(KonaneError::InputClosed)));

    let state = *game.state();
    assert_eq!(state.player(), Color::White);
    assert_eq!(state.board().get((3, 3)), Some(Color::Black));
    assert_eq!(state.board().get((1, 3)), None);
    assert_eq!(state.board().get((2, 3)), None);

    let text = String::from_utf8(game.into_output()).unwrap();
    assert!(text.contains("illegal move: D5 - D7"));
    assert!(text.contains("invalid move input: \"D7\""));
    assert!(text.contains("Move chosen: D7 - D5"));
    assert!(text.contains("Current Player: W"));
}

// =============================================================================
// Board files
// =============================================================================

#[test]
fn test_missing_board_file() {
    let path = std::env::temp_dir().join("konane-no-such-board.txt");
    match Board::load(&path) {
        Err(KonaneError::FileNotFound { path: missing, .. }) => assert_eq!(missing, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn test_malformed_board_file() {
    let path = board_file("short-row", &["BWBWBWBW", "WBWBWBW"]);
    let loaded = Board::load(&path);
    fs::remove_file(&path).unwrap();
    assert!(matches!(loaded, Err(KonaneError::BoardFormat(_))));
}
