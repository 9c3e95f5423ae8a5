//! Output module for run reporting
//!
//! This module records what a run did: how many links were accepted, which
//! archives were unpacked or abandoned, and which payloads were written.

pub mod stats;

pub use stats::{print_summary, RunSummary};
