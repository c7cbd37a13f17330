//! # Lootmask Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Fixture records (buildings, group profiles, layer configs)
//! - Sample XML documents for end-to-end runs
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
