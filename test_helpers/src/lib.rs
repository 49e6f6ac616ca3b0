//! Test helpers shared across crates.
//!
//! This crate provides parsed JSON documents used by the mapping contract
//! suites and a call counter for default-factory tests.

pub mod counter;
pub mod fixtures;
