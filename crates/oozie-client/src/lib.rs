//! Oozie jobs API client
//!
//! Queries the `/oozie/v1/jobs` endpoint of an Oozie server for
//! coordinator and workflow jobs:
//! - [`JobFilter`] builds the `filter` query parameter
//! - [`OozieClient::list_jobs`] issues a single listing
//! - [`OozieClient::coordinator_status`] lists running coordinators and
//!   attaches each one's recent workflow runs
//!
//! Requests run one after another. Only the first page of a listing is
//! read.

pub mod client;
pub mod error;
pub mod filter;
pub mod jobs;
pub mod schedule;

pub use client::{JobsRequest, OozieClient, DEFAULT_LEN, DEFAULT_OFFSET, DEFAULT_PORT};
pub use error::{ClientError, ClientResult};
pub use filter::JobFilter;
pub use jobs::{CoordinatorJob, JobType, JobsPage, TimeUnit, WorkflowJob};
pub use schedule::{runs_per_day, workflow_quota};
