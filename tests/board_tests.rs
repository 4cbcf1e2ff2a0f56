//! Board tests: bounds, occupancy, locking and row compaction

use stackfall::core::{lines, Board, Piece};
use stackfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
            assert!(!board.is_occupied(x, y));
        }
    }
}

#[test]
fn test_is_inside_has_no_lower_row_bound() {
    let board = Board::new();

    assert!(board.is_inside(0, 0));
    assert!(board.is_inside(9, 19));
    assert!(board.is_inside(4, -3));

    assert!(!board.is_inside(-1, 0));
    assert!(!board.is_inside(10, 0));
    assert!(!board.is_inside(0, 20));
}

#[test]
fn test_rows_above_board_never_occupied() {
    let mut board = Board::new();
    board.set(0, 0, Some(PieceKind::T));

    assert!(board.is_occupied(0, 0));
    assert!(!board.is_occupied(0, -1));
    assert!(!board.is_occupied(0, -20));
}

#[test]
fn test_lock_skips_cells_above_board() {
    let mut board = Board::new();
    // Vertical I: matrix column 2, board column 5, covering rows -2..=1.
    let piece = Piece {
        y: -2,
        ..Piece::spawn(PieceKind::I)
    };
    let piece = stackfall::core::try_rotate(&piece, |_| true).unwrap();
    board.lock(&piece);

    let occupied: Vec<_> = (0..BOARD_HEIGHT as i8)
        .flat_map(|y| (0..BOARD_WIDTH as i8).map(move |x| (x, y)))
        .filter(|&(x, y)| board.is_occupied(x, y))
        .collect();
    assert_eq!(occupied, vec![(5, 0), (5, 1)]);
}

#[test]
fn test_clear_row_shifts_rows_above() {
    let mut board = Board::from_rows(
        &[
            "#.........", // 16
            ".#........", // 17
            "..#.......", // 18
            "##########", // 19
        ],
        PieceKind::L,
    );

    board.clear_row(19);

    assert!(board.is_occupied(2, 19));
    assert!(board.is_occupied(1, 18));
    assert!(board.is_occupied(0, 17));
    assert!(board.is_row_empty(16));
    assert!(board.is_row_empty(0));
}

#[test]
fn test_cleared_row_complete_only_if_row_above_was() {
    let mut board = Board::from_rows(&["#########.", "##########"], PieceKind::O);
    board.clear_row(19);
    assert!(!board.is_row_complete(19));

    let mut board = Board::from_rows(&["##########", "##########"], PieceKind::O);
    board.clear_row(19);
    assert!(board.is_row_complete(19));
}

#[test]
fn test_single_gap_fill_clears_one_row() {
    let mut board = Board::from_rows(&["...#......", "#####.####"], PieceKind::J);
    board.set(5, 19, Some(PieceKind::I));

    assert_eq!(lines::resolve(&mut board), 1);
    assert!(board.is_occupied(3, 19));
    assert_eq!(board.row(19).iter().filter(|c| c.is_some()).count(), 1);
    assert!(board.is_row_empty(0));
}

#[test]
fn test_no_empty_row_below_occupied_after_resolve() {
    let mut board = Board::from_rows(
        &[
            "#.#.#.#.#.",
            "##########",
            ".#.#.#.#.#",
            "##########",
            "##########",
            "#.........",
        ],
        PieceKind::S,
    );

    assert_eq!(lines::resolve(&mut board), 3);

    let mut seen_occupied = false;
    for y in 0..BOARD_HEIGHT as usize {
        let empty = board.is_row_empty(y);
        if seen_occupied {
            assert!(!empty, "empty row {} below an occupied row", y);
        }
        seen_occupied |= !empty;
    }
    assert!(board.is_occupied(0, 19));
    assert!(board.is_occupied(1, 18));
    assert!(board.is_occupied(0, 17));
}
