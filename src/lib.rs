//! `pair-stats` library crate.
//!
//! The binary (`pstat`) is a thin wrapper around this library so that:
//!
//! - the regression engine is testable without spawning processes
//! - modules are reusable (e.g., future GUI/daemon, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod stats;
