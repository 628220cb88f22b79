use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use super::Scheduler;

/// Wall-clock scheduler backed by a tokio [`Interval`]
///
/// Dropping the interval on `stop` is the cancellation: a stopped scheduler's
/// [`wait`](Self::wait) never resolves, so no stale tick can fire.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    timer: Option<Interval>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve at the next tick; pending forever while stopped
    pub async fn wait(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&mut self, period: Duration) {
        if self.timer.is_some() {
            return;
        }
        // First tick one full period after starting, not immediately
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    fn stop(&mut self) {
        self.timer = None;
    }

    fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    fn period(&self) -> Option<Duration> {
        self.timer.as_ref().map(Interval::period)
    }
}
