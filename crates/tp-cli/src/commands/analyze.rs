//! Analyze command: full trip context as a brief or JSON.

use std::io::Write;

use anyhow::Result;
use tp_core::{Analysis, analyze_snapshot, format_brief};

use crate::Config;
use crate::cli::SnapshotArgs;
use crate::commands::util::{load_snapshot, resolve_clock};

/// Loads the snapshot named by `args` and analyzes it.
pub fn load_and_analyze(config: &Config, args: &SnapshotArgs) -> Result<Analysis> {
    let snapshot = load_snapshot(&args.file)?;
    let clock = resolve_clock(args.now.as_deref())?;
    Ok(analyze_snapshot(&snapshot, &config.analysis, &clock))
}

/// Formats normalization warnings as a trailing section.
pub fn format_warnings(analysis: &Analysis) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    if analysis.warnings.is_empty() {
        return output;
    }
    writeln!(output).unwrap();
    writeln!(output, "Warnings:").unwrap();
    for warning in &analysis.warnings {
        writeln!(output, "  - {warning}").unwrap();
    }
    output
}

pub fn run<W: Write>(writer: &mut W, config: &Config, args: &SnapshotArgs) -> Result<()> {
    let analysis = load_and_analyze(config, args)?;

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&analysis)?)?;
    } else {
        write!(writer, "{}", format_brief(&analysis.context))?;
        write!(writer, "{}", format_warnings(&analysis))?;
    }

    Ok(())
}
