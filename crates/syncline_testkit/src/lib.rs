//! # Syncline Testkit
//!
//! Test utilities for Syncline.
//!
//! This crate provides:
//! - Property-based generators for app states, modes and permission masks
//! - `FailingGenerator`, which fails the test if the hook runs unexpectedly
//! - `GateFixture`, a gated strategy wired to mock collaborators

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

pub use fixtures::{FailingGenerator, GateFixture};
