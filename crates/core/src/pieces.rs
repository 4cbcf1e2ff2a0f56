//! Pieces module - piece catalog, shape matrices and rotation with kicks
//!
//! Every kind has a canonical N×N matrix (N = 2 for O, 4 for I, 3 otherwise).
//! Rotation is a matrix transform followed by a short, kind-agnostic kick search
//! rather than a per-rotation-state lookup table, so a piece carries its current
//! matrix instead of a rotation index.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::PieceKind;

/// Largest shape matrix side (the I piece)
pub const MAX_SHAPE_SIZE: u8 = 4;

/// Set cells in every catalog shape
pub const MINOS_PER_PIECE: usize = 4;

/// Cell coordinates of a piece, either relative to its matrix or absolute on the board
pub type PieceCells = ArrayVec<(i8, i8), MINOS_PER_PIECE>;

/// Position offsets tried, in order, after a rotation.
///
/// The same six offsets apply to every kind and every orientation.
pub const KICKS: [(i8, i8); 6] = [(0, 0), (1, 0), (-1, 0), (0, -1), (1, -1), (-1, -1)];

/// Spawn row for new pieces
pub const SPAWN_Y: i8 = 0;

/// An N×N binary shape matrix.
///
/// Each row is a bitmask: bit `x` set means column `x` is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    rows: [u8; MAX_SHAPE_SIZE as usize],
}

impl Shape {
    const fn new(size: u8, rows: [u8; MAX_SHAPE_SIZE as usize]) -> Self {
        Self { size, rows }
    }

    /// Side length of the matrix
    pub fn size(&self) -> u8 {
        self.size
    }

    /// True if the matrix cell at (col, row) is set
    pub fn get(&self, col: u8, row: u8) -> bool {
        if col >= self.size || row >= self.size {
            return false;
        }
        self.rows[row as usize] & (1 << col) != 0
    }

    /// 90° clockwise transform: `new[x][N-1-y] = old[y][x]`.
    pub fn rotated_cw(&self) -> Shape {
        let n = self.size;
        let mut rows = [0u8; MAX_SHAPE_SIZE as usize];
        for y in 0..n {
            for x in 0..n {
                if self.get(x, y) {
                    rows[x as usize] |= 1 << (n - 1 - y);
                }
            }
        }
        Shape { size: n, rows }
    }

    /// Set cells as (col, row) offsets, in row-major order
    pub fn cells(&self) -> PieceCells {
        let mut out = PieceCells::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.get(col, row) {
                    out.push((col as i8, row as i8));
                }
            }
        }
        out
    }
}

const I_SHAPE: Shape = Shape::new(4, [0b0000, 0b1111, 0b0000, 0b0000]);
const J_SHAPE: Shape = Shape::new(3, [0b001, 0b111, 0b000, 0]);
const L_SHAPE: Shape = Shape::new(3, [0b100, 0b111, 0b000, 0]);
const O_SHAPE: Shape = Shape::new(2, [0b11, 0b11, 0, 0]);
const S_SHAPE: Shape = Shape::new(3, [0b110, 0b011, 0b000, 0]);
const T_SHAPE: Shape = Shape::new(3, [0b010, 0b111, 0b000, 0]);
const Z_SHAPE: Shape = Shape::new(3, [0b011, 0b110, 0b000, 0]);

/// Canonical spawn matrix for a piece kind
pub fn catalog_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Spawn column: O sits one column further right because its matrix is 2 wide.
pub fn spawn_x(kind: PieceKind) -> i8 {
    match kind {
        PieceKind::O => 4,
        _ => 3,
    }
}

/// A piece instance: kind, current matrix and top-left position on the board.
///
/// Pieces are plain values; speculative moves work on copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece with its canonical matrix at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: catalog_shape(kind),
            x: spawn_x(kind),
            y: SPAWN_Y,
        }
    }

    /// Covered cells in board coordinates
    pub fn cells(&self) -> PieceCells {
        self.shape
            .cells()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Copy of this piece moved by (dx, dy)
    pub fn offset(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn is_legal(&self, board: &Board) -> bool {
        is_legal(self, board)
    }
}

/// Check a placement against the walls, the floor and locked cells.
///
/// Cells above the top of the board are always legal (spawn buffer).
pub fn is_legal(piece: &Piece, board: &Board) -> bool {
    piece
        .cells()
        .iter()
        .all(|&(x, y)| board.is_inside(x, y) && !board.is_occupied(x, y))
}

/// Rotate clockwise and search the kick table.
///
/// Returns the rotated, kicked piece, or `None` if the kind is O or every kick
/// is blocked.
pub fn try_rotate(piece: &Piece, is_legal: impl Fn(&Piece) -> bool) -> Option<Piece> {
    if piece.kind == PieceKind::O {
        return None;
    }

    let rotated = Piece {
        shape: piece.shape.rotated_cw(),
        ..*piece
    };

    KICKS
        .iter()
        .map(|&(dx, dy)| rotated.offset(dx, dy))
        .find(|candidate| is_legal(candidate))
}

/// Project a piece straight down to the last legal row.
///
/// Used for the drop preview; never touches committed state.
pub fn compute_ghost(piece: &Piece, board: &Board) -> Piece {
    let mut ghost = *piece;
    while is_legal(&ghost, board) {
        ghost.y += 1;
    }
    ghost.y -= 1;
    ghost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(catalog_shape(PieceKind::I).size(), 4);
        assert_eq!(catalog_shape(PieceKind::O).size(), 2);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(catalog_shape(kind).size(), 3);
        }
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            let mut shape = catalog_shape(kind);
            for _ in 0..4 {
                assert_eq!(shape.cells().len(), MINOS_PER_PIECE);
                shape = shape.rotated_cw();
            }
        }
    }

    #[test]
    fn test_t_rotates_to_point_right() {
        let east = T_SHAPE.rotated_cw();
        assert_eq!(east.cells().as_slice(), &[(1, 0), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn test_i_rotates_to_vertical() {
        let vertical = I_SHAPE.rotated_cw();
        assert_eq!(vertical.cells().as_slice(), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_spawn_positions() {
        assert_eq!(Piece::spawn(PieceKind::O).x, 4);
        assert_eq!(Piece::spawn(PieceKind::I).x, 3);
        assert_eq!(Piece::spawn(PieceKind::T).y, 0);
    }

    #[test]
    fn test_ghost_on_empty_board() {
        let board = Board::new();
        let ghost = compute_ghost(&Piece::spawn(PieceKind::O), &board);
        assert_eq!((ghost.x, ghost.y), (4, 18));
    }
}
