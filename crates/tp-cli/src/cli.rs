//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Trip planner itinerary analysis.
///
/// Reads trip snapshots exported by the planner and reports schedule
/// conflicts, free time, meal gaps, budget burn and other plan defects.
#[derive(Debug, Parser)]
#[command(name = "tp", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a snapshot and print the trip brief.
    Analyze(SnapshotArgs),

    /// List the plan defects found in a snapshot.
    Issues(SnapshotArgs),

    /// Analyze many snapshots in parallel, one summary line each.
    Batch {
        /// Snapshot files to analyze.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Analyze as of this time (see `analyze --help`).
        #[arg(long)]
        now: Option<String>,
    },
}

/// Arguments shared by single-snapshot commands.
#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Path to the snapshot JSON file.
    pub file: PathBuf,

    /// Analyze as of this time (ISO 8601, YYYY-MM-DD, "3 days ago", "in 2 weeks").
    #[arg(long)]
    pub now: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}
