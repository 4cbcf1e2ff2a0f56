//! Render sink contract.
//!
//! The engine hands a fresh snapshot to the sink after every state change; how
//! (or whether) it is drawn is up to the sink.

use anyhow::Result;
use tokio::sync::mpsc;

use crate::core::GameSnapshot;

pub trait RenderSink {
    /// Called after every observable state change, and once at start-up.
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()>;

    /// Called once when the engine loop exits.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Discards every frame (headless runs, benchmarks).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _snapshot: &GameSnapshot) -> Result<()> {
        Ok(())
    }
}

/// Forwards frames to another task. A closed receiver is not an error.
impl RenderSink for mpsc::UnboundedSender<GameSnapshot> {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let _ = self.send(*snapshot);
        Ok(())
    }
}
