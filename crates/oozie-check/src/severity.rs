//! Monitoring severities and the mapping from Oozie job statuses.

use std::fmt;

use oozie_client::WorkflowJob;
use serde::{Deserialize, Serialize};

/// Four-state monitoring severity, ordered so the worst state is greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Ok = 0,
    Warn = 1,
    Error = 2,
    Unknown = 3,
}

impl Severity {
    /// Process exit code reported to the monitoring system.
    pub fn exit_code(self) -> i32 {
        self as i32
    }

    /// Worst severity in `severities`, or `None` if there are none.
    pub fn worst<I>(severities: I) -> Option<Severity>
    where
        I: IntoIterator<Item = Severity>,
    {
        severities.into_iter().max()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Ok => "Ok",
            Severity::Warn => "Warn",
            Severity::Error => "Error",
            Severity::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Oozie job statuses that carry a known severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OozieStatus {
    Failed,
    Killed,
    Suspended,
    Succeeded,
    Running,
    Prep,
}

impl OozieStatus {
    /// Parse an exact Oozie status name.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "FAILED" => Some(OozieStatus::Failed),
            "KILLED" => Some(OozieStatus::Killed),
            "SUSPENDED" => Some(OozieStatus::Suspended),
            "SUCCEEDED" => Some(OozieStatus::Succeeded),
            "RUNNING" => Some(OozieStatus::Running),
            "PREP" => Some(OozieStatus::Prep),
            _ => None,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            OozieStatus::Failed => Severity::Error,
            OozieStatus::Killed | OozieStatus::Suspended => Severity::Warn,
            OozieStatus::Succeeded | OozieStatus::Running | OozieStatus::Prep => Severity::Ok,
        }
    }
}

/// Severity of a raw status; anything unrecognized or absent is `Unknown`.
pub fn to_severity(raw: Option<&str>) -> Severity {
    raw.and_then(OozieStatus::parse)
        .map(OozieStatus::severity)
        .unwrap_or(Severity::Unknown)
}

/// Worst severity across workflows; `Unknown` when there are none.
pub fn reduce_workflow_severity(workflows: &[WorkflowJob]) -> Severity {
    Severity::worst(workflows.iter().map(|wf| to_severity(wf.status.as_deref())))
        .unwrap_or(Severity::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflow(status: &str) -> WorkflowJob {
        WorkflowJob {
            status: Some(status.to_string()),
            ..WorkflowJob::default()
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Ok < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Unknown);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Severity::Ok.exit_code(), 0);
        assert_eq!(Severity::Warn.exit_code(), 1);
        assert_eq!(Severity::Error.exit_code(), 2);
        assert_eq!(Severity::Unknown.exit_code(), 3);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Severity::Warn.to_string(), "Warn");
        assert_eq!(Severity::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_known_statuses() {
        assert_eq!(to_severity(Some("FAILED")), Severity::Error);
        assert_eq!(to_severity(Some("KILLED")), Severity::Warn);
        assert_eq!(to_severity(Some("SUSPENDED")), Severity::Warn);
        assert_eq!(to_severity(Some("SUCCEEDED")), Severity::Ok);
        assert_eq!(to_severity(Some("RUNNING")), Severity::Ok);
        assert_eq!(to_severity(Some("PREP")), Severity::Ok);
    }

    #[test]
    fn test_unrecognized_statuses_are_unknown() {
        for raw in ["", "failed", "DONEWITHERROR", "PREPSUSPENDED", " RUNNING"] {
            assert_eq!(to_severity(Some(raw)), Severity::Unknown, "status {raw:?}");
        }
        assert_eq!(to_severity(None), Severity::Unknown);
    }

    #[test]
    fn test_reduce_empty_is_unknown() {
        assert_eq!(reduce_workflow_severity(&[]), Severity::Unknown);
    }

    #[test]
    fn test_reduce_worst_wins() {
        let workflows = [workflow("SUCCEEDED"), workflow("FAILED")];
        assert_eq!(reduce_workflow_severity(&workflows), Severity::Error);

        let workflows = [workflow("SUCCEEDED"), workflow("KILLED"), workflow("RUNNING")];
        assert_eq!(reduce_workflow_severity(&workflows), Severity::Warn);

        let workflows = [workflow("FAILED"), workflow("BOGUS")];
        assert_eq!(reduce_workflow_severity(&workflows), Severity::Unknown);
    }

    #[test]
    fn test_worst_of_none() {
        assert_eq!(Severity::worst([]), None);
        assert_eq!(Severity::worst([Severity::Ok, Severity::Error]), Some(Severity::Error));
    }
}
