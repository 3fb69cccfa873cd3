//! Epoch slicing — usage of one day taken out of a month-scale log.
//!
//! A month profile carries absolute timestamps. To evaluate one day, the
//! events of that day are located with a binary search, re-based to
//! day-local minutes, and paired with the state the appliance was in when
//! the day began. The result is then handed to the single-day accumulator.

use crate::error::ValidationError;
use crate::event::Event;
use crate::period::{DayWindow, Period};
use crate::profile::Profile;
use crate::state::ApplianceState;
use crate::usage::accumulate;

/// Positions of a day's events in a timestamp-ordered log.
///
/// `start` is the first event at or after the day start, or `len` when every
/// event precedes the day. `end` is the first event at or after the day end,
/// or the last index when there is none. It is inclusive, so the first event
/// of the following day may be part of the range; [`normalize`] drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRange {
    pub start: usize,
    pub end: usize,
}

impl EventRange {
    /// Binary-search the bounds of `window` in `events`.
    ///
    /// `events` must be ordered by timestamp.
    #[must_use]
    pub fn locate(events: &[Event], window: &DayWindow) -> Self {
        let start = events.partition_point(|event| event.timestamp < window.start);
        let end = events
            .partition_point(|event| event.timestamp < window.end)
            .min(events.len().saturating_sub(1));
        Self { start, end }
    }
}

/// State the appliance was in when `window` began.
///
/// The first day, and any day with no state change before it, starts in the
/// profile's initial state. Otherwise the most recent change before the day
/// start decides.
#[must_use]
pub fn day_initial_state(
    initial: ApplianceState,
    events: &[Event],
    window: &DayWindow,
    range: EventRange,
) -> ApplianceState {
    if window.day == 1 || range.start == 0 {
        return initial;
    }
    events
        .get(range.start - 1)
        .map_or(initial, |event| event.state)
}

/// Day-local copies of the events of `window`.
///
/// Events at or after the window end belong to a later day and are dropped.
#[must_use]
pub fn normalize(events: &[Event], window: &DayWindow, range: EventRange) -> Vec<Event> {
    events
        .get(range.start..=range.end)
        .unwrap_or_default()
        .iter()
        .filter(|event| window.contains(event.timestamp))
        .map(|event| Event::new(event.state, window.to_local(event.timestamp)))
        .collect()
}

/// A validated, timestamp-ordered month profile ready to be sliced by day.
#[derive(Debug, Clone)]
pub struct EpochLog {
    initial: ApplianceState,
    events: Vec<Event>,
    period: Period,
}

impl EpochLog {
    /// Validate `profile` against the epoch bounds of `period`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPeriod`] when `period` is unusable and
    /// [`ValidationError::TimestampOutOfRange`] when an event lies outside
    /// `[0, period.epoch_end()]`.
    pub fn new(profile: &Profile, period: Period) -> Result<Self, ValidationError> {
        period.validate()?;
        for event in &profile.events {
            period.check_epoch(event.timestamp)?;
        }
        Ok(Self {
            initial: profile.initial,
            events: profile.sorted_events(),
            period,
        })
    }

    #[must_use]
    pub fn period(&self) -> &Period {
        &self.period
    }

    /// Powered minutes of `day`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDay`] when `day` is outside the
    /// configured day range.
    pub fn usage_for_day(&self, day: i64) -> Result<i64, ValidationError> {
        let window = self.period.day_window(day)?;
        Ok(self.usage_in(&window))
    }

    pub(crate) fn usage_in(&self, window: &DayWindow) -> i64 {
        let length = self.period.length;
        let (Some(first), Some(last)) = (self.events.first(), self.events.last()) else {
            tracing::trace!(day = window.day, "empty log, using initial state");
            return accumulate(self.initial, &[], length);
        };
        if window.end <= first.timestamp {
            tracing::trace!(day = window.day, "day precedes first event");
            return accumulate(self.initial, &[], length);
        }
        if window.start >= last.timestamp && last.state == ApplianceState::On {
            tracing::trace!(day = window.day, "day follows a final on event");
            return length;
        }

        let range = EventRange::locate(&self.events, window);
        let initial = day_initial_state(self.initial, &self.events, window, range);
        let local = normalize(&self.events, window, range);
        tracing::trace!(
            day = window.day,
            %initial,
            events = local.len(),
            "sliced day from epoch log"
        );
        accumulate(initial, &local, length)
    }
}

/// Powered minutes of `day` in a month-scale profile.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDay`] when `day` is outside the
/// configured range, or [`ValidationError::TimestampOutOfRange`] when an
/// event lies outside the epoch.
pub fn usage_for_day(profile: &Profile, day: i64, period: &Period) -> Result<i64, ValidationError> {
    let window = period.day_window(day)?;
    Ok(EpochLog::new(profile, *period)?.usage_in(&window))
}
