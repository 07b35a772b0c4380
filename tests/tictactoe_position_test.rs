//! Tests for tic-tac-toe position enum.

use tictactoe_oracle::{Board, Position, Side, Square};

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(8), Some(Position::BottomRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_from_label_or_number() {
    assert_eq!(Position::from_label_or_number("1"), Some(Position::TopLeft));
    assert_eq!(Position::from_label_or_number(" 9 "), Some(Position::BottomRight));
    assert_eq!(Position::from_label_or_number("0"), None);
    assert_eq!(Position::from_label_or_number("10"), None);
    assert_eq!(Position::from_label_or_number("center"), Some(Position::Center));
    assert_eq!(Position::from_label_or_number("Top-Right"), Some(Position::TopRight));
    assert_eq!(Position::from_label_or_number("bottom-c"), Some(Position::BottomCenter));
    // Ambiguous partial labels are refused.
    assert_eq!(Position::from_label_or_number("top"), None);
    assert_eq!(Position::from_label_or_number(""), None);
}

#[test]
fn test_corners_and_edges() {
    let corners: Vec<_> = Position::ALL.iter().filter(|p| p.is_corner()).collect();
    let edges: Vec<_> = Position::ALL.iter().filter(|p| p.is_edge()).collect();
    assert_eq!(corners.len(), 4);
    assert_eq!(edges.len(), 4);
    assert!(!Position::Center.is_corner() && !Position::Center.is_edge());
}

#[test]
fn test_valid_moves_empty_board() {
    let board = Board::new();
    let valid = Position::valid_moves(&board);
    assert_eq!(valid.len(), 9);
}

#[test]
fn test_valid_moves_filters_occupied() {
    let board = Board::new().with_move(0, Side::X).with_move(4, Side::O);

    let valid = Position::valid_moves(&board);
    assert_eq!(valid.len(), 7);
    assert!(!valid.contains(&Position::TopLeft));
    assert!(!valid.contains(&Position::Center));
    assert!(valid.contains(&Position::BottomRight));
}

#[test]
fn test_out_of_bounds_is_never_playable() {
    let board = Board::new().with_move(9, Side::X);
    assert_eq!(board, Board::new());
    assert_eq!(board.get(9), None);
    assert!(!board.is_empty(9));
    assert_eq!(board.get(4), Some(Square::Empty));
}
