//! Tooling & Integration Layer
//!
//! Command-line access to the config tree store.

pub mod cli;

pub use cli::{ApplySummary, Cli, CliContext, Commands};
