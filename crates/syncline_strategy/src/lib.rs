//! # Syncline Strategy
//!
//! State-gated request strategy contract for the Syncline sync engine.
//!
//! This crate provides:
//! - Application lifecycle state and the status reader seam
//! - The `StrategyConfig` permission mask and prerequisite mapping
//! - The `RequestGenerator` hook and `RequestStrategy` polling contract
//! - `GatedStrategy`, the reusable gate around a generator
//! - The request-cancellation capability consumed at teardown
//!
//! ## Architecture
//!
//! A strategy is a schedulable unit that may emit **at most one** outbound
//! request per poll. The scheduler polls every registered strategy each
//! cycle; the gate decides, from the current app state and the strategy's
//! declared permissions, whether the generation hook runs at all:
//!
//! ```text
//! scheduler → poll_once() → gate check → generate() → Request | nothing
//! ```
//!
//! ## Key Invariants
//!
//! - A strategy never emits a request in an app state it did not opt into
//! - The status handle is non-owning; its absence is a normal no-request
//!   outcome, not an error
//! - Teardown is idempotent, and a torn-down strategy polls as no-request
//! - Gating never mutates strategy or status state

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod app_state;
mod cancellation;
mod config;
mod error;
mod request;
mod strategy;

pub use app_state::{AppState, AppStatusReader, MockStatus, OperationMode};
pub use cancellation::{MockCancellation, RequestCancellation};
pub use config::StrategyConfig;
pub use error::{StrategyError, StrategyResult};
pub use request::{Request, RequestId};
pub use strategy::{GatedStrategy, RequestGenerator, RequestStrategy, ScriptedGenerator};
