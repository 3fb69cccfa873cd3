//! Usage — total powered minutes within a single day window.

use crate::error::ValidationError;
use crate::event::Event;
use crate::period::Period;
use crate::profile::Profile;
use crate::state::ApplianceState;

/// Where the scan stands relative to the current powered interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PowerCursor {
    Off,
    OnSince(i64),
}

impl PowerCursor {
    fn starting_at(state: ApplianceState) -> Self {
        if state.is_powered() {
            Self::OnSince(0)
        } else {
            Self::Off
        }
    }
}

/// Powered minutes of a day-local profile.
///
/// Events are read in timestamp order. Repeated `on` (or `off`) events are
/// ignored: only the first `on` of a run opens an interval and only the
/// first `off` closes it. An interval still open when the log ends runs to
/// the end of the period.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPeriod`] when `period` is unusable and
/// [`ValidationError::TimestampOutOfRange`] when an event lies outside
/// `[0, period.length]`.
pub fn usage(profile: &Profile, period: &Period) -> Result<i64, ValidationError> {
    period.validate()?;
    for event in &profile.events {
        period.check_local(event.timestamp)?;
    }
    let events = profile.sorted_events();
    Ok(accumulate(profile.initial, &events, period.length))
}

/// Scan already validated, timestamp-ordered events.
pub(crate) fn accumulate(initial: ApplianceState, events: &[Event], length: i64) -> i64 {
    let mut cursor = PowerCursor::starting_at(initial);
    let mut total = 0;
    for event in events {
        cursor = match (cursor, event.state.is_powered()) {
            (PowerCursor::OnSince(since), false) => {
                total += event.timestamp - since;
                PowerCursor::Off
            }
            (PowerCursor::Off, true) => PowerCursor::OnSince(event.timestamp),
            (unchanged, _) => unchanged,
        };
    }
    if let PowerCursor::OnSince(since) = cursor {
        total += length - since;
    }
    total
}
