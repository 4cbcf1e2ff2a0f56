//! Cancellable gravity timer.
//!
//! Each `arm` cancels the running task and starts a fresh `tokio::time::interval`
//! tagged with a new generation. Ticks carry their generation so the event loop
//! can drop any tick that was already queued when the timer was cancelled or
//! re-armed.

use std::time::Duration;

use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// A gravity signal from a specific timer generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityTick {
    pub generation: u64,
}

pub struct GravityTimer {
    tx: mpsc::Sender<GravityTick>,
    generation: u64,
    interval_ms: Option<u32>,
    task: Option<JoinHandle<()>>,
}

impl GravityTimer {
    pub fn new(tx: mpsc::Sender<GravityTick>) -> Self {
        Self {
            tx,
            generation: 0,
            interval_ms: None,
            task: None,
        }
    }

    /// Cancel any running timer and start a new one.
    ///
    /// The first tick fires one full period after arming. Must be called from
    /// within a tokio runtime.
    pub fn arm(&mut self, interval_ms: u32) {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);

        let generation = self.generation;
        let tx = self.tx.clone();
        let period = Duration::from_millis(interval_ms.max(1) as u64);

        self.task = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(GravityTick { generation }).await.is_err() {
                    break;
                }
            }
        }));
        self.interval_ms = Some(interval_ms);
        debug!("[Timer] armed generation {} at {}ms", generation, interval_ms);
    }

    /// Stop the running timer. Calling it again is a no-op.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            // Invalidate ticks already sitting in the queue.
            self.generation = self.generation.wrapping_add(1);
            debug!("[Timer] cancelled");
        }
        self.interval_ms = None;
    }

    /// True if `generation` belongs to the timer that is running now.
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && generation == self.generation
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for GravityTimer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_after_one_period() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = GravityTimer::new(tx);
        let start = Instant::now();

        timer.arm(250);
        let tick = rx.recv().await.unwrap();

        assert_eq!(tick.generation, timer.generation());
        assert!(timer.is_current(tick.generation));
        assert_eq!(start.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn rearm_invalidates_old_generation() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = GravityTimer::new(tx);

        timer.arm(1000);
        let old = timer.generation();
        timer.arm(500);

        assert!(!timer.is_current(old));
        assert_eq!(timer.interval_ms(), Some(500));

        let start = Instant::now();
        let tick = rx.recv().await.unwrap();
        assert!(timer.is_current(tick.generation));
        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent_and_silences_ticks() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = GravityTimer::new(tx);

        timer.arm(100);
        let armed = timer.generation();
        timer.cancel();
        let after_first = timer.generation();
        timer.cancel();

        assert!(!timer.is_armed());
        assert_eq!(timer.interval_ms(), None);
        assert_eq!(timer.generation(), after_first);
        assert!(!timer.is_current(armed));

        time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }
}
