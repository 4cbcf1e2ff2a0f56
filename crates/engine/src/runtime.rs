//! Serialized event loop.
//!
//! Player commands and gravity ticks are the only two event sources and they are
//! handled one at a time on a single task, so game state never needs a lock.

use anyhow::Result;
use log::{debug, info, trace};
use tokio::sync::mpsc;

use crate::core::{GameSession, GameSnapshot, StepReport, TimerDirective};
use crate::sink::RenderSink;
use crate::timer::{GravityTick, GravityTimer};
use crate::types::{Command, Phase};

const GRAVITY_QUEUE_CAPACITY: usize = 8;

/// Event delivered through an [`EngineHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Command(Command),
    Quit,
}

/// Cloneable sender side of the engine queue.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineEvent>,
}

impl EngineHandle {
    /// Returns false once the engine has stopped.
    pub async fn send(&self, command: Command) -> bool {
        self.tx.send(EngineEvent::Command(command)).await.is_ok()
    }

    /// Drops the command if the queue is full.
    pub fn try_send(&self, command: Command) -> bool {
        self.tx.try_send(EngineEvent::Command(command)).is_ok()
    }

    /// For callers outside the runtime (the input thread).
    pub fn blocking_send(&self, command: Command) -> bool {
        self.tx.blocking_send(EngineEvent::Command(command)).is_ok()
    }

    pub async fn quit(&self) {
        let _ = self.tx.send(EngineEvent::Quit).await;
    }

    pub fn blocking_quit(&self) {
        let _ = self.tx.blocking_send(EngineEvent::Quit);
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

pub struct Engine<S: RenderSink> {
    session: GameSession,
    sink: S,
    timer: GravityTimer,
    events: mpsc::Receiver<EngineEvent>,
    ticks: mpsc::Receiver<GravityTick>,
    frame: GameSnapshot,
}

impl<S: RenderSink> Engine<S> {
    pub fn new(session: GameSession, sink: S, queue_capacity: usize) -> (Self, EngineHandle) {
        let (tx, events) = mpsc::channel(queue_capacity.max(1));
        let (tick_tx, ticks) = mpsc::channel(GRAVITY_QUEUE_CAPACITY);

        let engine = Self {
            session,
            sink,
            timer: GravityTimer::new(tick_tx),
            events,
            ticks,
            frame: GameSnapshot::default(),
        };
        (engine, EngineHandle { tx })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn timer(&self) -> &GravityTimer {
        &self.timer
    }

    /// Run until `Quit` arrives or every handle is dropped. Returns the final session.
    pub async fn run(mut self) -> Result<GameSession> {
        self.start()?;

        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(EngineEvent::Command(command)) => {
                        self.handle_command(command)?;
                    }
                    Some(EngineEvent::Quit) | None => break,
                },
                Some(tick) = self.ticks.recv() => {
                    self.handle_tick(tick)?;
                }
            }
        }

        info!(
            "[Engine] stopped: game {} score {} lines {} level {}",
            self.session.game_id(),
            self.session.score(),
            self.session.lines(),
            self.session.level()
        );
        self.timer.cancel();
        self.sink.finish()?;
        Ok(self.session)
    }

    /// Present the first frame and start gravity if the game is running.
    pub fn start(&mut self) -> Result<()> {
        info!(
            "[Engine] starting game {} (seed {})",
            self.session.game_id(),
            self.session.seed()
        );
        if self.session.phase() == Phase::Running {
            self.timer.arm(self.session.fall_interval_ms());
        }
        self.present()
    }

    /// Returns whether the state changed.
    pub fn handle_command(&mut self, command: Command) -> Result<bool> {
        trace!("[Engine] command {}", command.as_str());
        let before = self.session.phase();
        let game_id = self.session.game_id();
        let report = self.session.apply(command);
        if self.session.game_id() != game_id {
            info!(
                "[Engine] new game {} (seed {})",
                self.session.game_id(),
                self.session.seed()
            );
        }
        self.finish_step(before, report)
    }

    /// Ticks from a cancelled or replaced timer are dropped.
    pub fn handle_tick(&mut self, tick: GravityTick) -> Result<bool> {
        if !self.timer.is_current(tick.generation) {
            trace!("[Timer] dropping stale tick from generation {}", tick.generation);
            return Ok(false);
        }
        let before = self.session.phase();
        let report = self.session.gravity_tick();
        self.finish_step(before, report)
    }

    fn finish_step(&mut self, before: Phase, report: StepReport) -> Result<bool> {
        match report.timer {
            TimerDirective::Keep => {}
            TimerDirective::Rearm { interval_ms } => self.timer.arm(interval_ms),
            TimerDirective::Stop => self.timer.cancel(),
        }

        if let Some(event) = self.session.take_last_event() {
            if event.lines_cleared > 0 {
                debug!(
                    "[Engine] {} locked, {} lines for {} points",
                    event.kind.as_str(),
                    event.lines_cleared,
                    event.points
                );
            }
            if let Some(level) = event.level_up {
                info!(
                    "[Engine] level {} reached, fall interval {}ms",
                    level,
                    self.session.fall_interval_ms()
                );
            }
        }

        let after = self.session.phase();
        match (before, after) {
            (Phase::Running, Phase::Paused) => info!("[Engine] paused"),
            (Phase::Paused, Phase::Running) => info!("[Engine] resumed"),
            (Phase::Running, Phase::GameOver) => {
                info!("[Engine] game over with score {}", self.session.score())
            }
            _ if before != after => debug!("[Engine] phase {} -> {}", before.as_str(), after.as_str()),
            _ => {}
        }

        if report.changed {
            self.present()?;
        }
        Ok(report.changed)
    }

    fn present(&mut self) -> Result<()> {
        self.session.snapshot_into(&mut self.frame);
        self.sink.present(&self.frame)
    }
}
