//! Test utilities.
//!
//! This module provides:
//! - Test data factories for creating valid fixtures
//! - An in-memory datastore implementing every repository trait
//! - A stub identity verifier and a fixed quote pricer
//! - `TestAppStateBuilder` for HTTP-level tests

mod factories;
mod mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use mocks::*;
