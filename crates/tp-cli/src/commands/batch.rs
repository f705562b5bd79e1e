//! Batch command: analyze many snapshots in parallel.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use tp_core::{Analysis, FixedClock, Severity, analyze_snapshot};

use crate::Config;
use crate::commands::util::{load_snapshot, resolve_clock};

/// One line of batch output.
fn summarize(analysis: &Analysis) -> String {
    let context = &analysis.context;
    let high = context
        .issues
        .iter()
        .filter(|i| i.severity == Severity::High)
        .count();
    let budget = &context.budget;

    let mut line = format!(
        "{}: {} issues ({high} high), spent {:.2} of {:.2} {}",
        context.destination,
        context.issues.len(),
        budget.spent,
        budget.total,
        budget.currency
    );
    if !analysis.warnings.is_empty() {
        line.push_str(&format!(", {} warnings", analysis.warnings.len()));
    }
    line
}

fn analyze_file(path: &Path, config: &Config, clock: &FixedClock) -> Result<String> {
    let snapshot = load_snapshot(path)?;
    Ok(summarize(&analyze_snapshot(&snapshot, &config.analysis, clock)))
}

/// Analyzes every file and writes one line per file, in input order.
///
/// Every file is analyzed as of the same instant. Fails after reporting if any
/// file could not be analyzed.
pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    files: &[PathBuf],
    now: Option<&str>,
) -> Result<()> {
    let clock = resolve_clock(now)?;

    let results: Vec<Result<String>> = files
        .par_iter()
        .map(|path| analyze_file(path, config, &clock))
        .collect();

    let mut failed = 0;
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(line) => writeln!(writer, "{}\t{line}", path.display())?,
            Err(e) => {
                failed += 1;
                tracing::warn!(path = ?path, error = %e, "failed to analyze snapshot");
                writeln!(writer, "{}\terror: {e:#}", path.display())?;
            }
        }
    }

    tracing::debug!(total = files.len(), failed, "batch complete");

    if failed > 0 {
        anyhow::bail!("{failed} of {} snapshots could not be analyzed", files.len());
    }
    Ok(())
}
