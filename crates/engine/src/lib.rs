//! Async driver for a [`GameSession`](stackfall_core::GameSession).
//!
//! One tokio task owns the session and consumes two queues: player commands sent
//! through an [`EngineHandle`] and ticks from the [`GravityTimer`]. After every
//! change the engine hands a snapshot to its [`RenderSink`] and applies the
//! session's timer directive (keep, re-arm at a new interval, or stop).
//!
//! ```no_run
//! use stackfall_core::GameSession;
//! use stackfall_engine::{Engine, EngineConfig, NullSink};
//! use stackfall_types::Command;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = EngineConfig::from_env();
//! let (engine, handle) = Engine::new(GameSession::new(config.seed), NullSink, config.queue_capacity);
//! let task = tokio::spawn(engine.run());
//!
//! handle.send(Command::HardDrop).await;
//! handle.quit().await;
//! let session = task.await??;
//! println!("final score {}", session.score());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod runtime;
pub mod sink;
pub mod timer;

pub use stackfall_core as core;
pub use stackfall_types as types;

pub use config::EngineConfig;
pub use runtime::{Engine, EngineEvent, EngineHandle};
pub use sink::{NullSink, RenderSink};
pub use timer::{GravityTick, GravityTimer};
