//! The game's tick source.
//!
//! A [`TickTimer`] holds a tokio interval only while the game is running.
//! Leaving the running state drops the interval, so a paused or finished
//! game can never receive a stale tick, and every speed change replaces the
//! interval instead of stacking a second one next to it.

use log::debug;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

pub struct TickTimer {
    interval: Option<Interval>,
}

impl TickTimer {
    /// A disarmed timer
    pub fn new() -> Self {
        Self { interval: None }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Current period, `None` while disarmed
    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(Interval::period)
    }

    /// Bring the timer in line with the game.
    ///
    /// Arms it when `running` and it isn't armed yet, re-arms it when the
    /// period changed, and releases it when the game is not running.
    pub fn sync(&mut self, running: bool, period: Duration) {
        if !running {
            if self.interval.take().is_some() {
                debug!("tick timer released");
            }
            return;
        }

        if self.period() == Some(period) {
            return;
        }

        // First tick fires one full period from now, not immediately
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        debug!("tick timer armed at {:?}", period);
    }

    /// Wait for the next tick. Never resolves while disarmed.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}
