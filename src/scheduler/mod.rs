//! Tick scheduling behind a swappable interface.
//!
//! The live game uses [`IntervalScheduler`], a tokio interval that can be
//! cancelled and re-armed with a new period. Tests use [`ManualScheduler`],
//! which only records transitions and leaves tick delivery to the caller.

pub mod interval;
pub mod manual;

pub use interval::IntervalScheduler;
pub use manual::{ManualScheduler, SchedulerEvent};

use std::time::Duration;

/// Drives the movement engine at a fixed period
pub trait Scheduler {
    /// Begin firing every `period`; no-op if already running
    fn start(&mut self, period: Duration);

    /// Cancel the outstanding tick and all future ones; no-op if stopped
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Current period, if running
    fn period(&self) -> Option<Duration>;

    /// Stop then start with a new period
    fn reschedule(&mut self, period: Duration) {
        self.stop();
        self.start(period);
    }
}
