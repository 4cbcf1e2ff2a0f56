//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, timers, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Every rule is a plain function or method over in-memory state
//! - **Portable**: Can be driven by any scheduler (tokio loop, headless tests, benches)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with occupancy queries, locking and row compaction
//! - [`pieces`]: piece catalog, shape matrices, legality, rotation kicks, ghost projection
//! - [`controller`]: current / next / held pieces and the move, rotate, drop and hold operations
//! - [`lines`]: bottom-up line resolver
//! - [`scoring`]: points, level and fall interval
//! - [`rng`]: uniform random piece generation
//! - [`session`]: the Running / Paused / GameOver state machine
//! - [`snapshot`]: read-only view for render collaborators
//!
//! # Game Rules
//!
//! - **Random pieces**: each piece is an independent uniform pick (no 7-bag)
//! - **Rotation**: clockwise matrix transform plus six fixed kick offsets, O never rotates
//! - **Hold**: once between two locks
//! - **Scoring**: 100/300/500/800 times the level for 1-4 rows
//! - **Pacing**: level every 10 lines, fall interval `max(100, 1000 - (level - 1) * 100)`
//!
//! # Example
//!
//! ```
//! use stackfall_core::GameSession;
//! use stackfall_types::{Command, Phase};
//!
//! let mut game = GameSession::new(12345);
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//! game.gravity_tick();
//!
//! assert_eq!(game.phase(), Phase::Running);
//! assert!(game.board().cells().iter().any(|cell| cell.is_some()));
//! ```

pub mod board;
pub mod controller;
pub mod lines;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use stackfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use controller::{HoldResult, PieceController};
pub use pieces::{catalog_shape, compute_ghost, is_legal, try_rotate, Piece, Shape, KICKS};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{ClearOutcome, ScoreState};
pub use session::{GameSession, LockEvent, StepReport, TimerDirective};
pub use snapshot::{GameSnapshot, PieceSnapshot};
