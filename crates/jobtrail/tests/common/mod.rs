//! Shared test utilities for integration tests.

pub mod builders;

pub use builders::*;
