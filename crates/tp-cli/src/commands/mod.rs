//! CLI subcommand implementations.

pub mod analyze;
pub mod batch;
pub mod issues;
pub mod util;
