//! Event — an immutable record of an appliance changing state.

use serde::{Deserialize, Serialize};

use crate::state::ApplianceState;

/// A state change at a given minute.
///
/// `timestamp` is an offset in minutes, either from the start of the epoch
/// (month-scale profiles) or from the start of a single day (day-local
/// profiles), depending on which computation consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub state: ApplianceState,
    pub timestamp: i64,
}

impl Event {
    #[must_use]
    pub fn new(state: ApplianceState, timestamp: i64) -> Self {
        Self { state, timestamp }
    }

    #[must_use]
    pub fn on(timestamp: i64) -> Self {
        Self::new(ApplianceState::On, timestamp)
    }

    #[must_use]
    pub fn off(timestamp: i64) -> Self {
        Self::new(ApplianceState::Off, timestamp)
    }

    #[must_use]
    pub fn auto_off(timestamp: i64) -> Self {
        Self::new(ApplianceState::AutoOff, timestamp)
    }
}
