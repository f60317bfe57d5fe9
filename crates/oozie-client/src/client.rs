//! HTTP client for the Oozie v1 REST API

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::filter::{JobFilter, NAME, STATUS};
use crate::jobs::{CoordinatorJob, JobType, JobsPage};
use crate::schedule::workflow_quota;

/// Default Oozie server port
pub const DEFAULT_PORT: u16 = 11000;

/// Default page length for job listings
pub const DEFAULT_LEN: u32 = 100;

/// Default page offset; Oozie offsets are 1-based
pub const DEFAULT_OFFSET: u32 = 1;

/// Parameters of a `/jobs` listing.
#[derive(Debug, Clone)]
pub struct JobsRequest {
    /// Encoded into the `filter` parameter
    pub filter: JobFilter,
    /// `wf`, `coordinator` or `bundle`; checked before sending
    pub job_type: String,
    /// Page length (`len`)
    pub len: u32,
    /// Page offset
    pub offset: u32,
}

impl Default for JobsRequest {
    fn default() -> Self {
        Self {
            filter: JobFilter::new(),
            job_type: JobType::Workflow.as_str().to_string(),
            len: DEFAULT_LEN,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl JobsRequest {
    /// Listing for the given job type with default paging.
    pub fn new(filter: JobFilter, job_type: impl Into<String>) -> Self {
        Self {
            filter,
            job_type: job_type.into(),
            ..Self::default()
        }
    }

    /// Set the page length.
    pub fn with_len(mut self, len: u32) -> Self {
        self.len = len;
        self
    }

    /// Set the page offset.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }
}

/// Client for one Oozie server
pub struct OozieClient {
    client: Client,
    base_url: String,
}

impl OozieClient {
    /// Create a client for `http://{host}:{port}/oozie/v1/`.
    pub fn new(host: &str, port: u16, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: format!("http://{}:{}/oozie/v1", host, port),
        })
    }

    /// Base URL of the v1 API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List jobs matching a filter.
    ///
    /// The job type is validated before any request is made.
    pub async fn list_jobs(&self, request: &JobsRequest) -> ClientResult<Value> {
        let job_type: JobType = request.job_type.parse()?;
        let url = format!("{}/jobs", self.base_url);
        let encoded = request.filter.encode();

        debug!(
            %url,
            filter = %encoded,
            jobtype = %job_type,
            len = request.len,
            offset = request.offset,
            "listing jobs"
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("filter", encoded),
                ("jobtype", job_type.as_str().to_string()),
                ("len", request.len.to_string()),
                ("offset", request.offset.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Running coordinators matching `filter`, each with its recent workflows.
    ///
    /// `len` caps the number of coordinators listed. For every coordinator
    /// the workflow lookback covers `days` worth of scheduled runs. Only the
    /// first page of each listing is read.
    pub async fn coordinator_status(
        &self,
        days: u32,
        filter: &JobFilter,
        len: u32,
    ) -> ClientResult<Vec<CoordinatorJob>> {
        let running = filter.with(STATUS, "RUNNING");
        let request = JobsRequest::new(running, JobType::Coordinator.as_str()).with_len(len);
        let page = self.fetch_page(&request).await?;
        let mut coordinators = page
            .coordinatorjobs
            .ok_or_else(|| missing_array("coordinatorjobs"))?;

        for coordinator in &mut coordinators {
            let quota = workflow_quota(days, coordinator)?;
            let app_name = coordinator.app_name().to_string();

            debug!(
                coordinator = %coordinator.name(),
                app_name = %app_name,
                quota,
                "fetching workflow history"
            );

            let workflow_filter = filter.with(NAME, app_name);
            let request =
                JobsRequest::new(workflow_filter, JobType::Workflow.as_str()).with_len(quota);
            let page = self.fetch_page(&request).await?;
            coordinator.workflows = page.workflows.ok_or_else(|| missing_array("workflows"))?;
        }

        Ok(coordinators)
    }

    async fn fetch_page(&self, request: &JobsRequest) -> ClientResult<JobsPage> {
        let body = self.list_jobs(request).await?;
        let page: JobsPage = serde_json::from_value(body)?;

        let fetched = page
            .coordinatorjobs
            .as_ref()
            .map(Vec::len)
            .or_else(|| page.workflows.as_ref().map(Vec::len))
            .unwrap_or_default() as u64;
        if let Some(total) = page.total {
            if total > fetched {
                debug!(
                    total,
                    fetched,
                    jobtype = %request.job_type,
                    "more jobs on the server than fetched"
                );
            }
        }

        Ok(page)
    }
}

fn missing_array(key: &str) -> ClientError {
    ClientError::MalformedResponse(format!("response has no `{key}` array"))
}
