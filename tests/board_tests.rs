//! Board and scanner tests against the public API.

use tui_gems::core::{board_is_stable, find_column_matches, find_row_matches, Board, MatchSpan};
use tui_gems::types::Position;

#[test]
fn test_board_new_empty() {
    let board = Board::new(6, 4);
    assert_eq!(board.width(), 6);
    assert_eq!(board.height(), 4);
    assert_eq!(board.count_empty(), 24);

    for y in 0..4 {
        for x in 0..6 {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_out_of_bounds() {
    let mut board = Board::new(3, 3);
    assert_eq!(board.get(3, 0), None);
    assert_eq!(board.get(0, 3), None);
    assert!(!board.set(3, 0, Some(1)));
    assert!(!board.contains(Position::new(0, 3)));
    assert!(board.contains(Position::new(2, 2)));
}

#[test]
fn test_board_swap_is_symmetric() {
    let mut board = Board::new(3, 3);
    board.set(0, 0, Some(2));
    board.set(0, 1, Some(5));

    let before = board.clone();
    assert!(board.swap(Position::new(0, 0), Position::new(0, 1)));
    assert!(board.swap(Position::new(0, 0), Position::new(0, 1)));
    assert_eq!(board, before);
}

#[test]
fn test_scan_finds_runs_on_both_axes() {
    let board = Board::from_rows(vec![
        vec![Some(1), Some(1), Some(1), Some(2)],
        vec![Some(0), Some(2), Some(0), Some(2)],
        vec![Some(2), Some(0), Some(1), Some(2)],
        vec![Some(0), Some(1), Some(0), Some(1)],
    ]);

    assert_eq!(find_row_matches(&board), vec![MatchSpan::row(0, 0, 2)]);
    assert_eq!(find_column_matches(&board), vec![MatchSpan::column(3, 0, 2)]);
    assert!(!board_is_stable(&board));
}

#[test]
fn test_stability_of_a_checkerboard() {
    let board = Board::from_rows(
        (0..5)
            .map(|y| (0..5).map(|x| Some(((x + y) % 2) as u8)).collect())
            .collect(),
    );
    assert!(board_is_stable(&board));
}
