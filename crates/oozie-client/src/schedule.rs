//! How many workflow runs to look back on per coordinator.

use tracing::warn;

use crate::error::ClientResult;
use crate::jobs::{CoordinatorJob, TimeUnit};

/// Number of coordinator runs per day for a unit and frequency.
///
/// An unrecognized unit counts as `DAY`.
pub fn runs_per_day(time_unit: &TimeUnit, frequency: f64) -> f64 {
    let multiplier = match time_unit {
        TimeUnit::Day => 1.0,
        TimeUnit::Minute => 24.0 * 60.0,
        TimeUnit::Hour => 24.0,
        TimeUnit::Week => 1.0 / 7.0,
        TimeUnit::Month => 1.0 / 30.0,
        TimeUnit::Unrecognized(_) => 1.0,
    };
    multiplier / frequency
}

/// Maximum number of workflows to request for a coordinator over `days`.
pub fn workflow_quota(days: u32, coordinator: &CoordinatorJob) -> ClientResult<u32> {
    let time_unit = coordinator.time_unit();
    if let TimeUnit::Unrecognized(raw) = &time_unit {
        // TODO: decide with operators whether an unknown unit should fail the check instead
        warn!(
            coordinator = %coordinator.name(),
            time_unit = %raw,
            "unrecognized timeUnit, assuming one run per frequency day"
        );
    }

    let frequency = coordinator.frequency()?;
    let quota = (f64::from(days) * runs_per_day(&time_unit, frequency)).floor();
    Ok(quota as u32)
}
