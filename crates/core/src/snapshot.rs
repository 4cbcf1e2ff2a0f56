//! Read-only view of a session for render collaborators.

use crate::pieces::{Piece, PieceCells, Shape};
use crate::types::{Cell, PieceKind, Phase, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl PieceSnapshot {
    /// Covered cells in board coordinates (may include rows above the top)
    pub fn cells(&self) -> PieceCells {
        Piece::from(*self).cells()
    }
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl From<PieceSnapshot> for Piece {
    fn from(value: PieceSnapshot) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: PieceSnapshot,
    /// Landing preview; absent once the game is over
    pub ghost: Option<PieceSnapshot>,
    pub next: PieceSnapshot,
    pub held: Option<PieceSnapshot>,
    pub can_hold: bool,
    pub phase: Phase,
    pub game_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    /// Cell occupant at (x, y), or None when empty or off the board
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        self.board[y as usize][x as usize]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let placeholder = PieceSnapshot::from(Piece::spawn(PieceKind::I));
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: placeholder,
            ghost: None,
            next: placeholder,
            held: None,
            can_hold: true,
            phase: Phase::Running,
            game_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            fall_interval_ms: crate::types::INITIAL_FALL_INTERVAL_MS,
        }
    }
}
