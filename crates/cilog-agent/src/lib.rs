//! cilog: library side of the `cilog` binary.
//!
//! Exposes configuration, the tool registry and the command runners so
//! other crates (e.g. `cilog-e2e-tests`) can drive them without a process.

pub mod cli;
pub mod config;
pub mod registry;
pub mod runner;
