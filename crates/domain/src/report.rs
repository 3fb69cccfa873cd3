//! Day-by-day usage report over the whole configured day range.

use serde::{Deserialize, Serialize};

use crate::epoch::EpochLog;
use crate::error::ValidationError;
use crate::period::Period;
use crate::profile::Profile;

/// Usage of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayUsage {
    pub day: u32,
    pub minutes: i64,
}

/// Per-day usage and its total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    pub days: Vec<DayUsage>,
    pub total_minutes: i64,
}

impl UsageReport {
    /// Usage of `day`, if the report covers it.
    #[must_use]
    pub fn day(&self, day: u32) -> Option<i64> {
        self.days
            .iter()
            .find(|entry| entry.day == day)
            .map(|entry| entry.minutes)
    }

    /// Days with any powered time.
    pub fn active_days(&self) -> impl Iterator<Item = &DayUsage> {
        self.days.iter().filter(|entry| entry.minutes > 0)
    }
}

/// Usage of every day in `period`, from a month-scale profile.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPeriod`] when `period` is unusable and
/// [`ValidationError::TimestampOutOfRange`] when an event lies outside the
/// epoch.
pub fn daily_usage(profile: &Profile, period: &Period) -> Result<UsageReport, ValidationError> {
    let log = EpochLog::new(profile, *period)?;
    let mut days = Vec::with_capacity(usize::try_from(period.day_count()).unwrap_or(0));
    for day in period.first_day..=period.last_day {
        let minutes = log.usage_for_day(i64::from(day))?;
        days.push(DayUsage { day, minutes });
    }
    let total_minutes = days.iter().map(|entry| entry.minutes).sum();
    Ok(UsageReport {
        days,
        total_minutes,
    })
}
