//! Display-refresh frame scheduling.

use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior};

use crate::traits::FrameScheduler;

/// Scheduler that ticks at a fixed display refresh rate.
///
/// Missed ticks are skipped rather than replayed, so a stalled consumer never
/// gets a burst of catch-up frames.
pub struct RefreshScheduler {
    interval: Interval,
}

impl RefreshScheduler {
    /// Scheduler targeting the given refresh rate.
    pub fn new(target_fps: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1)));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

impl FrameScheduler for RefreshScheduler {
    async fn next_frame(&mut self) {
        self.interval.tick().await;
    }
}
