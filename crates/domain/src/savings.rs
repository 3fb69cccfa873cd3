//! Savings — minutes the appliance was kept off by its automatic shutoff.
//!
//! Unlike [`usage`](crate::usage), "off" is not a single state here: only
//! downtime that starts with an `auto-off` event is attributed to the
//! shutoff feature. A manual `off` neither opens nor closes a savings window.

use crate::error::ValidationError;
use crate::period::Period;
use crate::profile::Profile;
use crate::state::ApplianceState;

/// Savings window tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SavingsCursor {
    NoPendingAutoOff,
    PendingAutoOffSince(i64),
}

/// Minutes saved by automatic shutoffs in a day-local profile.
///
/// The first `auto-off` of a run opens a window that lasts until the next
/// `on` event, or until the end of the period when no `on` follows. Manual
/// `off` events are inert: they do not shorten a pending window and do not
/// open one.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPeriod`] when `period` is unusable and
/// [`ValidationError::TimestampOutOfRange`] when an event lies outside
/// `[0, period.length]`.
pub fn savings(profile: &Profile, period: &Period) -> Result<i64, ValidationError> {
    period.validate()?;
    for event in &profile.events {
        period.check_local(event.timestamp)?;
    }

    let mut cursor = match profile.initial {
        ApplianceState::AutoOff => SavingsCursor::PendingAutoOffSince(0),
        ApplianceState::On | ApplianceState::Off => SavingsCursor::NoPendingAutoOff,
    };
    let mut total = 0;
    for event in profile.sorted_events() {
        cursor = match (cursor, event.state) {
            (SavingsCursor::PendingAutoOffSince(since), ApplianceState::On) => {
                total += event.timestamp - since;
                SavingsCursor::NoPendingAutoOff
            }
            (SavingsCursor::NoPendingAutoOff, ApplianceState::AutoOff) => {
                SavingsCursor::PendingAutoOffSince(event.timestamp)
            }
            (unchanged, _) => unchanged,
        };
    }
    if let SavingsCursor::PendingAutoOffSince(since) = cursor {
        total += period.length - since;
    }
    Ok(total)
}
