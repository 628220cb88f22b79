use std::time::Duration;

use super::Scheduler;

/// A transition observed by [`ManualScheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerEvent {
    Started(Duration),
    Stopped,
}

/// Deterministic scheduler: callers fire ticks themselves
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    period: Option<Duration>,
    events: Vec<SchedulerEvent>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every start/stop that actually changed state, oldest first
    pub fn events(&self) -> &[SchedulerEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, period: Duration) {
        if self.period.is_some() {
            return;
        }
        self.period = Some(period);
        self.events.push(SchedulerEvent::Started(period));
    }

    fn stop(&mut self) {
        if self.period.take().is_some() {
            self.events.push(SchedulerEvent::Stopped);
        }
    }

    fn is_running(&self) -> bool {
        self.period.is_some()
    }

    fn period(&self) -> Option<Duration> {
        self.period
    }
}
