//! Active piece controller - the falling piece, the lookahead and the hold slot
//!
//! The controller never owns the board. Every operation borrows it for legality
//! checks; only the session locks pieces into it.

use crate::board::Board;
use crate::pieces::{compute_ghost, is_legal, try_rotate, Piece};
use crate::rng::PieceGenerator;
use crate::types::PieceKind;

/// Result of a hold request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldResult {
    /// Hold was already used since the last lock; nothing changed
    AlreadyHeld,
    /// The current piece went into the hold slot
    Held,
    /// The piece brought into play cannot stand at its spawn position
    ToppedOut,
}

#[derive(Debug, Clone)]
pub struct PieceController {
    current: Piece,
    next: Piece,
    held: Option<Piece>,
    held_this_turn: bool,
    generator: PieceGenerator,
}

impl PieceController {
    /// Draw a lookahead piece and promote it into play.
    pub fn new(mut generator: PieceGenerator) -> Self {
        let lookahead = Piece::spawn(generator.next_kind());
        let mut controller = Self {
            current: lookahead,
            next: lookahead,
            held: None,
            held_this_turn: false,
            generator,
        };
        controller.advance_queue();
        controller
    }

    /// Start from a known current and next piece.
    pub fn with_queue(current: PieceKind, next: PieceKind, generator: PieceGenerator) -> Self {
        Self {
            current: Piece::spawn(current),
            next: Piece::spawn(next),
            held: None,
            held_this_turn: false,
            generator,
        }
    }

    pub fn current(&self) -> Piece {
        self.current
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn held(&self) -> Option<Piece> {
        self.held
    }

    pub fn has_held_this_turn(&self) -> bool {
        self.held_this_turn
    }

    pub fn generator(&self) -> &PieceGenerator {
        &self.generator
    }

    /// Replace the current piece outright (positioned scenarios, tests)
    pub fn set_current(&mut self, piece: Piece) {
        self.current = piece;
    }

    /// Offset the current piece if the result is legal.
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        let candidate = self.current.offset(dx, dy);
        if is_legal(&candidate, board) {
            self.current = candidate;
            true
        } else {
            false
        }
    }

    /// Rotate clockwise with kicks. The O piece never rotates.
    ///
    /// On failure both shape and position stay as they were.
    pub fn rotate(&mut self, board: &Board) -> bool {
        match try_rotate(&self.current, |p| is_legal(p, board)) {
            Some(rotated) => {
                self.current = rotated;
                true
            }
            None => false,
        }
    }

    /// Move the current piece down until the next row would be illegal.
    ///
    /// Returns the number of rows dropped. The piece is not locked here.
    pub fn hard_drop(&mut self, board: &Board) -> u32 {
        let start = self.current.y;
        let mut probe = self.current;
        loop {
            probe.y += 1;
            if !is_legal(&probe, board) {
                break;
            }
        }
        probe.y -= 1;
        self.current = probe;
        (probe.y - start).max(0) as u32
    }

    /// Landing preview for the current piece
    pub fn ghost(&self, board: &Board) -> Piece {
        compute_ghost(&self.current, board)
    }

    /// Stash the current piece, or swap it with the held one.
    ///
    /// Allowed once between two locks. Both pieces of a swap come back in
    /// their spawn orientation and position. A piece brought in by the hold
    /// (promoted or swapped) that is blocked at its spawn position returns
    /// [`HoldResult::ToppedOut`], which ends the game like a blocked promotion.
    pub fn hold(&mut self, board: &Board) -> HoldResult {
        if self.held_this_turn {
            return HoldResult::AlreadyHeld;
        }

        let stashed = Piece::spawn(self.current.kind);
        let legal = match self.held.replace(stashed) {
            None => self.promote(board),
            Some(previous) => {
                self.current = Piece::spawn(previous.kind);
                is_legal(&self.current, board)
            }
        };

        // promote() clears the flag; a hold must still count for this turn.
        self.held_this_turn = true;

        if legal {
            HoldResult::Held
        } else {
            HoldResult::ToppedOut
        }
    }

    /// Bring the lookahead into play and draw a fresh lookahead.
    ///
    /// Returns false when the new piece is blocked at its spawn position.
    pub fn promote(&mut self, board: &Board) -> bool {
        self.advance_queue();
        is_legal(&self.current, board)
    }

    fn advance_queue(&mut self) {
        self.current = self.next;
        self.next = Piece::spawn(self.generator.next_kind());
        self.held_this_turn = false;
    }
}
