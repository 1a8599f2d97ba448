//! End-to-end tests for cilog live under `tests/`.
//!
//! Each test builds a results root on disk with the shared `helpers`
//! harness and drives it through the public APIs of every crate.
