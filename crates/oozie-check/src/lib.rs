//! Oozie coordinator health check
//!
//! Lists the running coordinators on an Oozie server, fetches each one's
//! recent workflow runs and reduces their statuses to a single monitoring
//! verdict. The process exit code is the verdict:
//! - 0 `Ok`: every workflow succeeded, is running or is being prepared
//! - 1 `Warn`: a workflow was killed or suspended
//! - 2 `Error`: a workflow failed
//! - 3 `Unknown`: an unrecognized status, or the check itself failed

use std::ffi::OsString;
use std::time::Duration;

use clap::{ArgAction, Parser};
use oozie_client::filter::{NAME, USER};
use oozie_client::{JobFilter, OozieClient, DEFAULT_LEN, DEFAULT_PORT};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod error;
pub mod report;
pub mod severity;

pub use config::CheckConfig;
pub use error::{CheckError, CheckResult};
pub use report::{report, Report, MAX_VERBOSITY};
pub use severity::{reduce_workflow_severity, to_severity, OozieStatus, Severity};

/// Default days of workflow history
pub const DEFAULT_DAYS: u32 = 3;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "check-oozie")]
#[command(about = "Get status of Oozie jobs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Oozie server host
    pub host: String,

    /// Oozie server port [default: 11000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Limit on number of coordinators to check [default: 100]
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// User name to filter
    #[arg(short, long)]
    pub user: Option<String>,

    /// Name to filter
    #[arg(short, long)]
    pub name: Option<String>,

    /// How many days back to examine workflow history [default: 3]
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Increase output verbosity (use up to 3 times)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "OOZIE_CHECK_CONFIG")]
    pub config: Option<String>,

    /// Request timeout in seconds [default: 30]
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Log request details to stderr
    #[arg(long)]
    pub debug: bool,
}

/// Fully resolved settings for one check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    pub host: String,
    pub port: u16,
    pub limit: u32,
    pub days: u32,
    pub filter: JobFilter,
    pub verbosity: u8,
    pub timeout: Duration,
}

impl CheckOptions {
    /// Merge flags over the config file over built-in defaults.
    pub fn resolve(cli: Cli, config: CheckConfig) -> Self {
        let user = cli.user.or(config.user);
        let name = cli.name.or(config.name);

        let mut filter = JobFilter::new();
        if let Some(user) = user {
            filter = filter.with(USER, user);
        }
        if let Some(name) = name {
            filter = filter.with(NAME, name);
        }

        Self {
            host: cli.host,
            port: cli.port.or(config.port).unwrap_or(DEFAULT_PORT),
            limit: cli.limit.or(config.limit).unwrap_or(DEFAULT_LEN),
            days: cli.days.or(config.days).unwrap_or(DEFAULT_DAYS),
            filter,
            verbosity: cli.verbose.min(MAX_VERBOSITY),
            timeout: Duration::from_secs(
                cli.timeout
                    .or(config.timeout_seconds)
                    .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            ),
        }
    }
}

/// Query the server and build the report.
pub async fn run_check(options: &CheckOptions) -> CheckResult<Report> {
    let client = OozieClient::new(&options.host, options.port, options.timeout)?;

    debug!(
        base_url = %client.base_url(),
        filter = %options.filter,
        days = options.days,
        limit = options.limit,
        "checking coordinators"
    );

    let coordinators = client
        .coordinator_status(options.days, &options.filter, options.limit)
        .await?;

    Ok(report(&coordinators, options.verbosity))
}

/// Run using the current process arguments.
pub async fn run() -> Severity {
    run_with_args(std::env::args_os()).await
}

/// Run using the provided argument iterator.
///
/// Report lines go to stdout. A failure is printed to stdout as well and
/// yields `Unknown`.
pub async fn run_with_args<I, T>(args: I) -> Severity
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Initialize tracing
    let filter = if cli.debug { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();

    let result = match CheckConfig::load(cli.config.as_deref()) {
        Ok(config) => run_check(&CheckOptions::resolve(cli, config)).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            for line in &report.lines {
                println!("{}", line);
            }
            report.severity
        }
        Err(e) => {
            println!("{}", e);
            Severity::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("check-oozie").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let options = CheckOptions::resolve(cli(&["oozie01"]), CheckConfig::default());
        assert_eq!(options.host, "oozie01");
        assert_eq!(options.port, 11000);
        assert_eq!(options.limit, 100);
        assert_eq!(options.days, 3);
        assert_eq!(options.verbosity, 0);
        assert!(options.filter.is_empty());
        assert_eq!(options.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_flags() {
        let options = CheckOptions::resolve(
            cli(&["oozie01", "-p", "12000", "-u", "t4b", "-n", "dash", "-d", "7", "-vv"]),
            CheckConfig::default(),
        );
        assert_eq!(options.port, 12000);
        assert_eq!(options.days, 7);
        assert_eq!(options.verbosity, 2);
        assert_eq!(options.filter.encode(), "name=dash;user=t4b");
    }

    #[test]
    fn test_verbosity_is_clamped() {
        let options = CheckOptions::resolve(cli(&["oozie01", "-vvvvv"]), CheckConfig::default());
        assert_eq!(options.verbosity, MAX_VERBOSITY);
    }

    #[test]
    fn test_flags_override_config() {
        let config = CheckConfig {
            port: Some(11443),
            days: Some(5),
            limit: Some(10),
            user: Some("etl".to_string()),
            name: None,
            timeout_seconds: Some(4),
        };
        let options = CheckOptions::resolve(cli(&["oozie01", "--days", "1", "-u", "t4b"]), config);
        assert_eq!(options.port, 11443);
        assert_eq!(options.days, 1);
        assert_eq!(options.limit, 10);
        assert_eq!(options.filter.get("user"), Some("t4b"));
        assert_eq!(options.timeout, Duration::from_secs(4));
    }
}
