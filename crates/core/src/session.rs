//! Game session module - the top-level state machine
//!
//! Ties together the board, the piece controller, the line resolver and scoring.
//! The session is driven from outside: a scheduler calls [`GameSession::gravity_tick`]
//! every `fall_interval_ms`, and an input source calls [`GameSession::apply`].
//! Each call returns a [`StepReport`] telling the scheduler whether to keep,
//! re-arm or stop its gravity timer; the session itself owns no timer.

use crate::board::Board;
use crate::controller::{HoldResult, PieceController};
use crate::lines;
use crate::pieces::Piece;
use crate::rng::PieceGenerator;
use crate::scoring::ScoreState;
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{Command, Phase, PieceKind};

/// What the gravity scheduler should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDirective {
    /// Leave the current timer alone
    Keep,
    /// Cancel the current timer and start a new one at this period
    Rearm { interval_ms: u32 },
    /// Cancel the current timer
    Stop,
}

/// Outcome of a single session step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Whether any observable state changed
    pub changed: bool,
    pub timer: TimerDirective,
}

impl StepReport {
    fn unchanged() -> Self {
        Self {
            changed: false,
            timer: TimerDirective::Keep,
        }
    }

    fn changed(changed: bool) -> Self {
        Self {
            changed,
            timer: TimerDirective::Keep,
        }
    }

    fn with_timer(timer: TimerDirective) -> Self {
        Self {
            changed: true,
            timer,
        }
    }
}

/// Event emitted after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub points: u32,
    /// New level, if this lock raised it
    pub level_up: Option<u32>,
    pub topped_out: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    pieces: PieceController,
    scoring: ScoreState,
    phase: Phase,
    seed: u32,
    /// Monotonic game id (increments on new game).
    game_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameSession {
    /// Start a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::from_parts(seed, Board::new(), PieceController::new(PieceGenerator::new(seed)))
    }

    /// Start from a prepared board with known current and next pieces.
    ///
    /// Later pieces come from the seeded generator.
    pub fn from_position(seed: u32, board: Board, current: PieceKind, next: PieceKind) -> Self {
        let pieces = PieceController::with_queue(current, next, PieceGenerator::new(seed));
        Self::from_parts(seed, board, pieces)
    }

    fn from_parts(seed: u32, board: Board, pieces: PieceController) -> Self {
        let phase = if pieces.current().is_legal(&board) {
            Phase::Running
        } else {
            Phase::GameOver
        };
        Self {
            board,
            pieces,
            scoring: ScoreState::new(),
            phase,
            seed,
            game_id: 0,
            last_event: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines()
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.scoring.fall_interval_ms()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Piece {
        self.pieces.current()
    }

    pub fn next(&self) -> Piece {
        self.pieces.next()
    }

    pub fn held(&self) -> Option<Piece> {
        self.pieces.held()
    }

    pub fn has_held_this_turn(&self) -> bool {
        self.pieces.has_held_this_turn()
    }

    pub fn ghost(&self) -> Piece {
        self.pieces.ghost(&self.board)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.current = PieceSnapshot::from(self.pieces.current());
        out.ghost = match self.phase {
            Phase::GameOver => None,
            _ => Some(PieceSnapshot::from(self.ghost())),
        };
        out.next = PieceSnapshot::from(self.pieces.next());
        out.held = self.pieces.held().map(PieceSnapshot::from);
        out.can_hold = !self.pieces.has_held_this_turn();
        out.phase = self.phase;
        out.game_id = self.game_id;
        out.score = self.scoring.score();
        out.level = self.scoring.level();
        out.lines = self.scoring.lines();
        out.fall_interval_ms = self.scoring.fall_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Periodic gravity signal: move down one row, locking if blocked.
    pub fn gravity_tick(&mut self) -> StepReport {
        if self.phase != Phase::Running {
            return StepReport::unchanged();
        }
        self.step_down()
    }

    /// Apply a player command
    pub fn apply(&mut self, command: Command) -> StepReport {
        if command == Command::NewGame {
            return self.restart();
        }

        match self.phase {
            Phase::Running => self.apply_running(command),
            Phase::Paused => match command {
                Command::Resume | Command::TogglePause => {
                    self.phase = Phase::Running;
                    StepReport::with_timer(TimerDirective::Rearm {
                        interval_ms: self.fall_interval_ms(),
                    })
                }
                _ => StepReport::unchanged(),
            },
            Phase::GameOver => StepReport::unchanged(),
        }
    }

    fn apply_running(&mut self, command: Command) -> StepReport {
        match command {
            Command::MoveLeft => StepReport::changed(self.pieces.try_move(&self.board, -1, 0)),
            Command::MoveRight => StepReport::changed(self.pieces.try_move(&self.board, 1, 0)),
            Command::Rotate => StepReport::changed(self.pieces.rotate(&self.board)),
            Command::SoftDrop => self.step_down(),
            Command::HardDrop => {
                self.pieces.hard_drop(&self.board);
                self.lock_and_advance()
            }
            Command::Hold => match self.pieces.hold(&self.board) {
                HoldResult::AlreadyHeld => StepReport::unchanged(),
                HoldResult::Held => StepReport::changed(true),
                HoldResult::ToppedOut => {
                    self.phase = Phase::GameOver;
                    StepReport::with_timer(TimerDirective::Stop)
                }
            },
            Command::Pause | Command::TogglePause => {
                self.phase = Phase::Paused;
                StepReport::with_timer(TimerDirective::Stop)
            }
            Command::Resume | Command::NewGame => StepReport::unchanged(),
        }
    }

    fn step_down(&mut self) -> StepReport {
        if self.pieces.try_move(&self.board, 0, 1) {
            StepReport::changed(true)
        } else {
            self.lock_and_advance()
        }
    }

    /// Lock the current piece, clear rows, score, and promote the lookahead.
    fn lock_and_advance(&mut self) -> StepReport {
        let locked = self.pieces.current();
        self.board.lock(&locked);

        let cleared = lines::resolve(&mut self.board);
        let outcome = self.scoring.apply_clear(cleared);
        let topped_out = !self.pieces.promote(&self.board);

        self.last_event = Some(LockEvent {
            kind: locked.kind,
            lines_cleared: cleared,
            points: outcome.points,
            level_up: outcome.level_up.map(|_| self.scoring.level()),
            topped_out,
        });

        if topped_out {
            self.phase = Phase::GameOver;
            return StepReport::with_timer(TimerDirective::Stop);
        }

        match outcome.level_up {
            Some(interval_ms) => StepReport::with_timer(TimerDirective::Rearm { interval_ms }),
            None => StepReport::changed(true),
        }
    }

    fn restart(&mut self) -> StepReport {
        let seed = self.pieces.generator().seed();
        let next_game = self.game_id.wrapping_add(1);
        *self = Self::new(seed);
        self.game_id = next_game;
        StepReport::with_timer(TimerDirective::Rearm {
            interval_ms: self.fall_interval_ms(),
        })
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
