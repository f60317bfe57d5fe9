//! Job records returned by the `/jobs` endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};

/// Value accepted by the `jobtype` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobType {
    /// Workflow jobs (`wf`)
    Workflow,
    /// Coordinator jobs
    Coordinator,
    /// Bundle jobs
    Bundle,
}

impl JobType {
    /// Wire name of the job type.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Workflow => "wf",
            JobType::Coordinator => "coordinator",
            JobType::Bundle => "bundle",
        }
    }
}

impl FromStr for JobType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wf" => Ok(JobType::Workflow),
            "coordinator" => Ok(JobType::Coordinator),
            "bundle" => Ok(JobType::Bundle),
            other => Err(ClientError::InvalidJobType(other.to_string())),
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinator scheduling unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    /// Anything else the service reports, including a missing value.
    Unrecognized(String),
}

impl TimeUnit {
    /// Parse the `timeUnit` field of a coordinator record.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("MINUTE") => TimeUnit::Minute,
            Some("HOUR") => TimeUnit::Hour,
            Some("DAY") => TimeUnit::Day,
            Some("WEEK") => TimeUnit::Week,
            Some("MONTH") => TimeUnit::Month,
            Some(other) => TimeUnit::Unrecognized(other.to_string()),
            None => TimeUnit::Unrecognized(String::new()),
        }
    }
}

/// One workflow execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowJob {
    /// Workflow job id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Raw Oozie status (`SUCCEEDED`, `KILLED`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Start time as formatted by the service
    #[serde(rename = "startTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    /// Application name, matched against the coordinator path
    #[serde(rename = "appName", default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Remaining fields, kept so the full record can be echoed back
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One coordinator job, optionally enriched with its recent workflows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorJob {
    /// Coordinator name
    #[serde(rename = "coordJobName", default, skip_serializing_if = "Option::is_none")]
    pub coord_job_name: Option<String>,

    /// Raw coordinator status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Scheduling unit (`MINUTE`, `HOUR`, `DAY`, `WEEK`, `MONTH`)
    #[serde(rename = "timeUnit", default, skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<String>,

    /// Scheduling frequency; the service sends a string or a number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Value>,

    /// Application path; its last segment names the child workflows
    #[serde(rename = "coordJobPath", default, skip_serializing_if = "Option::is_none")]
    pub coord_job_path: Option<String>,

    /// Recent workflows, newest first as returned by the service
    #[serde(default)]
    pub workflows: Vec<WorkflowJob>,

    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CoordinatorJob {
    /// Coordinator name, or empty if the service omitted it.
    pub fn name(&self) -> &str {
        self.coord_job_name.as_deref().unwrap_or_default()
    }

    /// Parsed scheduling unit.
    pub fn time_unit(&self) -> TimeUnit {
        TimeUnit::parse(self.time_unit.as_deref())
    }

    /// Application name of the child workflows.
    ///
    /// This is the last `/` segment of `coordJobPath`, which is not
    /// necessarily the same as `coordJobName`.
    pub fn app_name(&self) -> &str {
        let path = self.coord_job_path.as_deref().unwrap_or_default();
        path.rsplit('/').next().unwrap_or(path)
    }

    /// Scheduling frequency as a strictly positive number.
    pub fn frequency(&self) -> ClientResult<f64> {
        let invalid = |value: String| ClientError::InvalidFrequency {
            coordinator: self.name().to_string(),
            value,
        };

        let parsed = match &self.frequency {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed {
            Some(f) if f.is_finite() && f > 0.0 => Ok(f),
            _ => Err(invalid(
                self.frequency
                    .as_ref()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .unwrap_or_default(),
            )),
        }
    }
}

/// Top-level body of a `/jobs` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobsPage {
    /// Total number of matching jobs on the server
    #[serde(default)]
    pub total: Option<u64>,

    /// Offset of this page
    #[serde(default)]
    pub offset: Option<u64>,

    /// Page length requested
    #[serde(default)]
    pub len: Option<u64>,

    /// Present for `jobtype=coordinator`
    #[serde(default)]
    pub coordinatorjobs: Option<Vec<CoordinatorJob>>,

    /// Present for `jobtype=wf`
    #[serde(default)]
    pub workflows: Option<Vec<WorkflowJob>>,
}
