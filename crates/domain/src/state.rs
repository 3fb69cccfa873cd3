//! Appliance state — the value carried by every state-change event.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Power state of an appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplianceState {
    On,
    Off,
    /// Switched off by the device itself rather than by the user.
    AutoOff,
}

impl ApplianceState {
    /// Whether this state counts as powered when accumulating usage.
    ///
    /// The usage computation does not distinguish the cause of a state, so
    /// [`AutoOff`](Self::AutoOff) counts the same as [`On`](Self::On) there.
    #[must_use]
    pub fn is_powered(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Wire name of the state.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::AutoOff => "auto-off",
        }
    }
}

impl std::fmt::Display for ApplianceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplianceState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "auto-off" => Ok(Self::AutoOff),
            other => Err(ValidationError::InvalidState(other.to_string())),
        }
    }
}
