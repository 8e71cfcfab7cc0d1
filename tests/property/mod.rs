//! Property-based tests for the merge engine

mod determinism;
