//! Shared test utilities for end-to-end CLI tests.

pub mod harness;
