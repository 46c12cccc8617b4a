//! Integration tests for gray-rs crates.
//!
//! End-to-end checks that decode -> kernel sweep -> encode keeps the
//! grayscale guarantees across crate boundaries.
