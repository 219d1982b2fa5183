//! The polling scheduler.

use crate::cancellation::CancellationRegistry;
use crate::config::SchedulerConfig;
use crate::error::{SchedulerError, SchedulerResult};
use crate::submit::RequestSubmitter;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use syncline_strategy::RequestStrategy;
use tracing::{debug, warn};

/// Counters over the scheduler's lifetime.
#[derive(Debug, Clone, Default)]
pub struct SchedulerStats {
    /// Total number of cycles completed.
    pub cycles_completed: u64,
    /// Total number of requests submitted.
    pub requests_submitted: u64,
    /// Total number of generation errors observed.
    pub generation_errors: u64,
    /// Last generation error message.
    pub last_error: Option<String>,
}

/// Result of a single scheduling cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleResult {
    /// Number of strategies polled.
    pub polled: usize,
    /// Number of requests submitted.
    pub submitted: usize,
    /// Number of generation errors.
    pub errors: usize,
}

/// Polls every registered strategy each cycle and submits what they
/// produce.
///
/// Strategies are polled sequentially in registration order; their internal
/// state is not designed for concurrent polls, so a cycle never overlaps
/// another. The scheduler owns retry policy at the cycle level: a strategy
/// whose generation failed is simply polled again next cycle.
pub struct Scheduler<S: RequestSubmitter> {
    config: SchedulerConfig,
    submitter: Arc<S>,
    registry: Arc<CancellationRegistry>,
    strategies: RwLock<Vec<Arc<dyn RequestStrategy>>>,
    stats: RwLock<SchedulerStats>,
    shut_down: AtomicBool,
    running: AtomicBool,
}

impl<S: RequestSubmitter> Scheduler<S> {
    /// Creates a scheduler with its own cancellation registry.
    pub fn new(config: SchedulerConfig, submitter: S) -> Self {
        Self::with_registry(config, submitter, Arc::new(CancellationRegistry::new()))
    }

    /// Creates a scheduler around an existing registry.
    pub fn with_registry(
        config: SchedulerConfig,
        submitter: S,
        registry: Arc<CancellationRegistry>,
    ) -> Self {
        Self {
            config,
            submitter: Arc::new(submitter),
            registry,
            strategies: RwLock::new(Vec::new()),
            stats: RwLock::new(SchedulerStats::default()),
            shut_down: AtomicBool::new(false),
            running: AtomicBool::new(false),
        }
    }

    /// The registry strategies register their emitted requests with.
    pub fn registry(&self) -> &Arc<CancellationRegistry> {
        &self.registry
    }

    /// The submitter requests are handed to.
    pub fn submitter(&self) -> &Arc<S> {
        &self.submitter
    }

    /// Current stats.
    pub fn stats(&self) -> SchedulerStats {
        self.stats.read().clone()
    }

    /// Number of registered strategies.
    pub fn strategy_count(&self) -> usize {
        self.strategies.read().len()
    }

    /// Returns true once [`Scheduler::shut_down`] has run.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    /// Registers a strategy to be polled every cycle.
    pub fn register(&self, strategy: Arc<dyn RequestStrategy>) -> SchedulerResult<()> {
        if self.is_shut_down() {
            return Err(SchedulerError::ShutDown);
        }
        self.strategies.write().push(strategy);
        Ok(())
    }

    /// Runs one scheduling cycle.
    ///
    /// Polls each strategy once in registration order, submitting whatever
    /// it returns, until the optional per-cycle cap is reached. After
    /// shutdown this is a no-op cycle rather than an error, since a final
    /// queued cycle may race teardown.
    pub fn run_cycle(&self) -> CycleResult {
        if self.is_shut_down() {
            return CycleResult::default();
        }

        // Snapshot so polls run without holding the registration lock.
        let strategies: Vec<Arc<dyn RequestStrategy>> =
            self.strategies.read().iter().cloned().collect();

        let mut result = CycleResult::default();
        for strategy in strategies {
            if let Some(cap) = self.config.max_requests_per_cycle {
                if result.submitted >= cap {
                    break;
                }
            }

            result.polled += 1;
            match strategy.poll_once() {
                Ok(Some(request)) => {
                    debug!(id = %request.id(), kind = request.kind(), "submitting request");
                    self.submitter.submit(request);
                    result.submitted += 1;
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(%error, retryable = error.is_retryable(), "request generation failed");
                    result.errors += 1;
                    self.stats.write().last_error = Some(error.to_string());
                }
            }
        }

        let mut stats = self.stats.write();
        stats.cycles_completed += 1;
        stats.requests_submitted += result.submitted as u64;
        stats.generation_errors += result.errors as u64;
        drop(stats);

        result
    }

    /// Drives cycles on a fixed interval until shutdown.
    pub async fn run(&self) -> SchedulerResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(SchedulerError::AlreadyRunning);
        }

        let mut interval = tokio::time::interval(self.config.cycle_interval);
        while !self.is_shut_down() {
            interval.tick().await;
            if self.is_shut_down() {
                break;
            }
            self.run_cycle();
        }

        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Cancels every outstanding request through the submitter.
    ///
    /// The session layer calls this on logout or client deletion; strategies
    /// never cancel the requests they already emitted themselves.
    pub fn cancel_outstanding(&self) {
        for id in self.registry.cancel_all() {
            self.submitter.cancel(id);
        }
    }

    /// Shuts the scheduler down.
    ///
    /// Idempotent. Tears down every registered strategy, cancels all
    /// outstanding requests and stops the run loop at its next tick.
    pub fn shut_down(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }

        let strategies = std::mem::take(&mut *self.strategies.write());
        debug!(count = strategies.len(), "tearing down strategies");
        for strategy in &strategies {
            strategy.tear_down();
        }
        self.cancel_outstanding();
    }
}
