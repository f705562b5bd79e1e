//! Trip planner CLI library.
//!
//! This crate provides the CLI interface for the itinerary analysis engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, SnapshotArgs};
pub use config::Config;
