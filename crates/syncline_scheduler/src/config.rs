//! Configuration for the scheduler.

use std::time::Duration;

/// Configuration for the polling scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Interval between scheduling cycles.
    pub cycle_interval: Duration,
    /// Maximum number of requests submitted per cycle, if capped.
    pub max_requests_per_cycle: Option<usize>,
}

impl SchedulerConfig {
    /// Creates a configuration with the given cycle interval and no cap.
    pub fn new(cycle_interval: Duration) -> Self {
        Self {
            cycle_interval,
            max_requests_per_cycle: None,
        }
    }

    /// Caps the number of requests submitted per cycle.
    pub fn with_max_requests_per_cycle(mut self, cap: usize) -> Self {
        self.max_requests_per_cycle = Some(cap);
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}
