//! Check verdict and per-job output lines.

use oozie_client::{CoordinatorJob, WorkflowJob};

use crate::severity::{reduce_workflow_severity, to_severity, Severity};

/// Highest supported verbosity level.
pub const MAX_VERBOSITY: u8 = 3;

/// Result of a check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Worst workflow severity across all coordinators
    pub severity: Severity,
    /// Lines to print, in coordinator then workflow order
    pub lines: Vec<String>,
}

/// Reduce enriched coordinators to a verdict and output lines.
///
/// The verdict is `Ok` when no workflows were found at all; a
/// coordinator without workflows is only reported as `Unknown` in its
/// verbosity-1 line.
///
/// - verbosity 0: no lines
/// - verbosity 1: one line per coordinator
/// - verbosity 2: one line per workflow
/// - verbosity 3: each workflow record as JSON
pub fn report(coordinators: &[CoordinatorJob], verbosity: u8) -> Report {
    let mut severity = Severity::Ok;
    let mut lines = Vec::new();

    for coordinator in coordinators {
        for wf in &coordinator.workflows {
            severity = severity.max(to_severity(wf.status.as_deref()));

            match verbosity {
                0 | 1 => {}
                2 => lines.push(workflow_line(coordinator, wf)),
                _ => lines.push(raw_record(wf)),
            }
        }

        if verbosity == 1 {
            lines.push(format!(
                "{} {} {}",
                coordinator.name(),
                coordinator.workflows.len(),
                reduce_workflow_severity(&coordinator.workflows)
            ));
        }
    }

    Report { severity, lines }
}

fn workflow_line(coordinator: &CoordinatorJob, wf: &WorkflowJob) -> String {
    format!(
        "{} {} {} {} \"{}\"",
        coordinator.name(),
        field(&coordinator.status),
        field(&wf.status),
        field(&wf.id),
        field(&wf.start_time),
    )
}

fn raw_record(wf: &WorkflowJob) -> String {
    serde_json::to_string(wf).unwrap_or_else(|_| format!("{wf:?}"))
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coordinator(name: &str, statuses: &[&str]) -> CoordinatorJob {
        let workflows = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                json!({
                    "id": format!("{i}-W"),
                    "status": status,
                    "startTime": "Tue, 03 Mar 2015 10:00:00 GMT",
                    "appName": name,
                })
            })
            .collect::<Vec<_>>();

        serde_json::from_value(json!({
            "coordJobName": name,
            "status": "RUNNING",
            "workflows": workflows,
        }))
        .unwrap()
    }

    #[test]
    fn test_no_coordinators_is_ok() {
        let report = report(&[], 2);
        assert_eq!(report.severity, Severity::Ok);
        assert!(report.lines.is_empty());
    }

    #[test]
    fn test_coordinator_without_workflows_is_ok_overall() {
        let report = report(&[coordinator("idle", &[])], 0);
        assert_eq!(report.severity, Severity::Ok);
    }

    #[test]
    fn test_worst_across_coordinators() {
        let coordinators = [
            coordinator("a", &["SUCCEEDED", "KILLED"]),
            coordinator("b", &["FAILED", "SUCCEEDED"]),
        ];
        assert_eq!(report(&coordinators, 0).severity, Severity::Error);
    }

    #[test]
    fn test_verbosity_zero_has_no_lines() {
        let report = report(&[coordinator("a", &["SUCCEEDED"])], 0);
        assert!(report.lines.is_empty());
    }

    #[test]
    fn test_verbosity_one_summarizes_coordinators() {
        let coordinators = [
            coordinator("a", &["SUCCEEDED", "KILLED"]),
            coordinator("idle", &[]),
        ];
        let report = report(&coordinators, 1);
        assert_eq!(report.lines, ["a 2 Warn", "idle 0 Unknown"]);
        assert_eq!(report.severity, Severity::Warn);
    }

    #[test]
    fn test_verbosity_two_lists_workflows() {
        let report = report(&[coordinator("a", &["SUCCEEDED", "FAILED"])], 2);
        assert_eq!(
            report.lines,
            [
                "a RUNNING SUCCEEDED 0-W \"Tue, 03 Mar 2015 10:00:00 GMT\"",
                "a RUNNING FAILED 1-W \"Tue, 03 Mar 2015 10:00:00 GMT\"",
            ]
        );
    }

    #[test]
    fn test_verbosity_two_missing_fields() {
        let coordinator: CoordinatorJob = serde_json::from_value(json!({
            "coordJobName": "a",
            "workflows": [{}],
        }))
        .unwrap();
        let report = report(&[coordinator], 2);
        assert_eq!(report.lines, ["a - - - \"-\""]);
        assert_eq!(report.severity, Severity::Unknown);
    }

    #[test]
    fn test_verbosity_three_emits_raw_records() {
        let report = report(&[coordinator("a", &["KILLED"])], 3);
        assert_eq!(report.lines.len(), 1);

        let record: serde_json::Value = serde_json::from_str(&report.lines[0]).unwrap();
        assert_eq!(record["id"], "0-W");
        assert_eq!(record["appName"], "a");
        assert_eq!(record["status"], "KILLED");
    }

    #[test]
    fn test_verbosity_above_three_behaves_as_three() {
        let coordinators = [coordinator("a", &["SUCCEEDED"])];
        assert_eq!(report(&coordinators, 7), report(&coordinators, MAX_VERBOSITY));
    }
}
