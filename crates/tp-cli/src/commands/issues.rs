//! Issues command: plan defects only.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use tp_core::TripIssue;

use crate::Config;
use crate::cli::SnapshotArgs;
use crate::commands::analyze::load_and_analyze;

/// Formats issues as a human-readable list.
pub fn format_issues(issues: &[TripIssue]) -> String {
    let mut output = String::new();

    if issues.is_empty() {
        writeln!(output, "No issues found.").unwrap();
        return output;
    }

    let noun = if issues.len() == 1 { "issue" } else { "issues" };
    writeln!(output, "{} {noun} found", issues.len()).unwrap();
    writeln!(output).unwrap();

    for issue in issues {
        let scope = issue
            .day
            .map_or_else(|| "trip".to_string(), |d| format!("day {d}"));
        writeln!(
            output,
            "{:<6} {:<16} {scope}",
            issue.severity.as_str().to_uppercase(),
            issue.issue_type.as_str()
        )
        .unwrap();
        writeln!(output, "  {}", issue.message).unwrap();
        if let Some(affected) = &issue.affected_activities {
            writeln!(output, "  Affects: {}", affected.join(", ")).unwrap();
        }
        writeln!(output, "  Suggestion: {}", issue.suggestion).unwrap();
    }

    output
}

pub fn run<W: Write>(writer: &mut W, config: &Config, args: &SnapshotArgs) -> Result<()> {
    let analysis = load_and_analyze(config, args)?;
    let issues = &analysis.context.issues;

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(issues)?)?;
    } else {
        write!(writer, "{}", format_issues(issues))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use tp_core::{IssueType, Severity};

    fn issue(
        issue_type: IssueType,
        severity: Severity,
        day: Option<u32>,
        affected: Option<&[&str]>,
    ) -> TripIssue {
        TripIssue {
            issue_type,
            severity,
            day,
            message: format!("{issue_type} detected"),
            suggestion: "Fix it".to_string(),
            affected_activities: affected.map(|a| a.iter().map(ToString::to_string).collect()),
        }
    }

    #[test]
    fn test_format_no_issues() {
        assert_eq!(format_issues(&[]), "No issues found.\n");
    }

    #[test]
    fn test_format_issue_list() {
        let issues = [
            issue(
                IssueType::TimeConflict,
                Severity::High,
                Some(2),
                Some(&["Museum", "Cafe"]),
            ),
            issue(IssueType::MealGap, Severity::Medium, Some(3), None),
            issue(IssueType::BudgetOverrun, Severity::High, None, None),
        ];

        assert_snapshot!(format_issues(&issues), @r"
3 issues found

HIGH   time_conflict    day 2
  time_conflict detected
  Affects: Museum, Cafe
  Suggestion: Fix it
MEDIUM meal_gap         day 3
  meal_gap detected
  Suggestion: Fix it
HIGH   budget_overrun   trip
  budget_overrun detected
  Suggestion: Fix it
");
    }

    #[test]
    fn test_json_output_is_issue_array() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("trip.json");
        std::fs::write(
            &path,
            r#"{"trip": {"startDate": "2025-05-01", "endDate": "2025-05-01",
                "itinerary": [{"dayNumber": 1, "date": "2025-05-01"}]}}"#,
        )
        .unwrap();
        let args = SnapshotArgs {
            file: path,
            now: Some("2025-04-01".to_string()),
            json: true,
        };

        let mut output = Vec::new();
        run(&mut output, &Config::default(), &args).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let issues = value.as_array().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0]["type"], "no_accommodation");
        assert_eq!(issues[0]["day"], 1);
    }
}
