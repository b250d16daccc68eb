//! Integration tests for artmint
//!
//! Exercises the allowlist minter against the in-memory host and the payload
//! store end to end, plus shared fixtures.

pub mod common;

#[cfg(test)]
pub(crate) mod e2e_tests;

pub use common::*;
