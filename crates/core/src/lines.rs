//! Line resolver - removes completed rows after a lock
//!
//! Rows are scanned bottom to top. After a row is cleared, the rows above have
//! shifted into it, so the same index is examined again before moving up. This
//! keeps non-contiguous completed rows (e.g. rows 19 and 17 with 18 partial)
//! correct.

use crate::board::Board;
use crate::types::BOARD_HEIGHT;

/// Clear every complete row and compact the stack. Returns the number of rows removed.
pub fn resolve(board: &mut Board) -> u32 {
    let mut cleared = 0u32;
    let mut y = BOARD_HEIGHT as usize;

    while y > 0 {
        let row = y - 1;
        if board.is_row_complete(row) {
            board.clear_row(row);
            cleared += 1;
            // Re-examine `row`: its new content came from above.
            continue;
        }
        y -= 1;
    }

    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_resolve_empty_board() {
        let mut board = Board::new();
        assert_eq!(resolve(&mut board), 0);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_resolve_non_contiguous_rows() {
        let mut board = Board::from_rows(
            &[
                "#.........", // 16
                "##########", // 17
                "#########.", // 18
                "##########", // 19
            ],
            PieceKind::T,
        );

        assert_eq!(resolve(&mut board), 2);

        // Old row 18 drops to 19, old row 16 drops to 18.
        assert!(!board.is_row_complete(19));
        assert!(board.is_occupied(0, 19));
        assert!(!board.is_occupied(9, 19));
        assert!(board.is_occupied(0, 18));
        assert!(!board.is_occupied(1, 18));
        assert!(board.is_row_empty(17));
    }

    #[test]
    fn test_resolve_four_stacked_rows() {
        let mut board = Board::from_rows(
            &[
                "....#.....",
                "##########",
                "##########",
                "##########",
                "##########",
            ],
            PieceKind::I,
        );

        assert_eq!(resolve(&mut board), 4);
        assert!(board.is_occupied(4, 19));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn test_resolve_full_board_terminates() {
        let rows = ["##########"; 20];
        let mut board = Board::from_rows(&rows, PieceKind::Z);
        assert_eq!(resolve(&mut board), 20);
        assert_eq!(board, Board::new());
    }
}
