//! # Syncline Scheduler
//!
//! Polling scheduler, application-status provider and cancellation registry
//! for the Syncline sync engine.
//!
//! This crate provides:
//! - `ApplicationStatus`, the concrete status provider strategies read
//! - `CancellationRegistry` for bulk request cancellation on logout
//! - The `RequestSubmitter` transport seam
//! - `Scheduler`, which polls every registered strategy each cycle
//!
//! ## Architecture
//!
//! The scheduler is single-threaded-cooperative relative to its strategy
//! pool: each cycle polls strategies sequentially in registration order and
//! hands produced requests to the submitter. Strategies decide for
//! themselves, via their permission mask and the current app state, whether
//! they are allowed to act; the scheduler never second-guesses a gate.
//!
//! ## Key Invariants
//!
//! - One cycle polls each strategy at most once, in registration order
//! - Shutdown tears every strategy down and cancels outstanding requests
//! - A generation error never aborts the cycle; the strategy is simply
//!   re-polled next cycle

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cancellation;
mod config;
mod error;
mod scheduler;
mod status;
mod submit;

pub use cancellation::CancellationRegistry;
pub use config::SchedulerConfig;
pub use error::{SchedulerError, SchedulerResult};
pub use scheduler::{CycleResult, Scheduler, SchedulerStats};
pub use status::ApplicationStatus;
pub use submit::{RecordingSubmitter, RequestSubmitter};
