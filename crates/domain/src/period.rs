//! Period — the day window length and the range of addressable days.
//!
//! Every computation receives its [`Period`] explicitly so that alternate
//! period lengths can be used (tests routinely use short periods).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Length of a day window and the days an epoch covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Period {
    /// Length of one day window, in minutes.
    pub length: i64,
    /// First addressable day number.
    pub first_day: u32,
    /// Last addressable day number.
    pub last_day: u32,
}

impl Default for Period {
    fn default() -> Self {
        Self {
            length: MINUTES_PER_DAY,
            first_day: 1,
            last_day: 365,
        }
    }
}

/// Closed-open window `[start, end)` of one day, in epoch minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub day: u32,
    pub start: i64,
    pub end: i64,
}

impl DayWindow {
    /// Whether `timestamp` falls inside the window.
    #[must_use]
    pub fn contains(&self, timestamp: i64) -> bool {
        self.start <= timestamp && timestamp < self.end
    }

    /// Re-base an epoch timestamp onto the start of this day.
    #[must_use]
    pub fn to_local(&self, timestamp: i64) -> i64 {
        timestamp - self.start
    }
}

impl Period {
    /// Create a period with the given day length and the default day range.
    #[must_use]
    pub fn with_length(length: i64) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    /// Check that the period describes a usable epoch.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPeriod`] when the length is not
    /// positive, the day range is empty or starts at 0, or the end of the
    /// last day does not fit in an `i64` minute count.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.length <= 0 {
            return Err(ValidationError::InvalidPeriod(format!(
                "length {} must be positive",
                self.length
            )));
        }
        if self.first_day == 0 {
            return Err(ValidationError::InvalidPeriod(
                "first day must be at least 1".to_string(),
            ));
        }
        if self.first_day > self.last_day {
            return Err(ValidationError::InvalidPeriod(format!(
                "first day {} is after last day {}",
                self.first_day, self.last_day
            )));
        }
        if i64::from(self.last_day).checked_mul(self.length).is_none() {
            return Err(self.overflow());
        }
        Ok(())
    }

    fn overflow(&self) -> ValidationError {
        ValidationError::InvalidPeriod(format!(
            "{} days of {} minutes overflow the minute range",
            self.last_day, self.length
        ))
    }

    /// Number of days the epoch covers.
    #[must_use]
    pub fn day_count(&self) -> u64 {
        if self.first_day > self.last_day {
            0
        } else {
            u64::from(self.last_day - self.first_day) + 1
        }
    }

    /// Highest timestamp accepted in an epoch-scale profile.
    #[must_use]
    pub fn epoch_end(&self) -> i64 {
        i64::from(self.last_day).saturating_mul(self.length)
    }

    /// Check that `day` is addressable.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDay`] when `day` is outside
    /// `[first_day, last_day]`.
    pub fn check_day(&self, day: i64) -> Result<u32, ValidationError> {
        u32::try_from(day)
            .ok()
            .filter(|day| (self.first_day..=self.last_day).contains(day))
            .ok_or_else(|| self.invalid_day(day.to_string()))
    }

    /// Parse a day number supplied as text (command line, query string, …).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDay`] when `raw` is not an integer or
    /// is outside `[first_day, last_day]`.
    pub fn parse_day(&self, raw: &str) -> Result<u32, ValidationError> {
        let day = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| self.invalid_day(raw.to_string()))?;
        self.check_day(day)
    }

    fn invalid_day(&self, day: String) -> ValidationError {
        ValidationError::InvalidDay {
            day,
            first: self.first_day,
            last: self.last_day,
        }
    }

    /// Closed-open epoch window of `day`.
    ///
    /// Day 1 covers `[0, length)`, day `d` covers `[(d-1)·length, d·length)`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDay`] when `day` is not addressable,
    /// and [`ValidationError::InvalidPeriod`] when its window does not fit in
    /// the minute range.
    pub fn day_window(&self, day: i64) -> Result<DayWindow, ValidationError> {
        let day = self.check_day(day)?;
        let start = i64::from(day.saturating_sub(1))
            .checked_mul(self.length)
            .ok_or_else(|| self.overflow())?;
        let end = start
            .checked_add(self.length)
            .ok_or_else(|| self.overflow())?;
        Ok(DayWindow { day, start, end })
    }

    /// Check that a day-local timestamp lies in `[0, length]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TimestampOutOfRange`] otherwise.
    pub fn check_local(&self, timestamp: i64) -> Result<(), ValidationError> {
        check_range(timestamp, 0, self.length)
    }

    /// Check that an epoch timestamp lies in `[0, epoch_end]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TimestampOutOfRange`] otherwise.
    pub fn check_epoch(&self, timestamp: i64) -> Result<(), ValidationError> {
        check_range(timestamp, 0, self.epoch_end())
    }
}

fn check_range(timestamp: i64, min: i64, max: i64) -> Result<(), ValidationError> {
    if (min..=max).contains(&timestamp) {
        Ok(())
    } else {
        Err(ValidationError::TimestampOutOfRange {
            timestamp,
            min,
            max,
        })
    }
}
