//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`PowerLogError`] via `#[from]`. Hosts that need to translate a failure
//! into a user-facing message should match on [`PowerLogError::kind`]
//! rather than on the rendered wording.

/// Top-level error returned by every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum PowerLogError {
    /// The supplied profile or day number violates a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A profile source (file, network, …) failed to produce a profile.
    #[error("profile source error")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PowerLogError {
    /// Stable, machine-readable identifier for this failure.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.kind(),
            Self::Source(_) => "source",
        }
    }
}

/// Invalid input detected before or during a computation.
///
/// Any of these aborts the whole computation; there is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The profile document is missing `initial`/`events` or has the wrong shape.
    #[error("invalid profile shape: {0}")]
    InvalidProfileShape(String),

    /// A state is not one of `on`, `off`, `auto-off`.
    #[error("invalid state {0:?}")]
    InvalidState(String),

    /// An event timestamp lies outside the window it is evaluated against.
    #[error("timestamp {timestamp} outside of [{min}, {max}]")]
    TimestampOutOfRange {
        /// The offending timestamp, in minutes.
        timestamp: i64,
        /// Lowest accepted timestamp.
        min: i64,
        /// Highest accepted timestamp.
        max: i64,
    },

    /// The requested day is outside the configured day range.
    #[error("day {day} outside of [{first}, {last}]")]
    InvalidDay {
        /// The requested day, as supplied by the caller.
        day: String,
        /// First accepted day.
        first: u32,
        /// Last accepted day.
        last: u32,
    },

    /// The period length or day range cannot describe an epoch.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),
}

impl ValidationError {
    /// Stable, machine-readable identifier for this failure.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidProfileShape(_) => "invalid_profile_shape",
            Self::InvalidState(_) => "invalid_state",
            Self::TimestampOutOfRange { .. } => "timestamp_out_of_range",
            Self::InvalidDay { .. } => "invalid_day",
            Self::InvalidPeriod(_) => "invalid_period",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_distinct_kinds() {
        let kinds = [
            ValidationError::InvalidProfileShape("events".into()).kind(),
            ValidationError::InvalidState("dimmed".into()).kind(),
            ValidationError::TimestampOutOfRange {
                timestamp: -1,
                min: 0,
                max: 1440,
            }
            .kind(),
            ValidationError::InvalidDay {
                day: "0".into(),
                first: 1,
                last: 365,
            }
            .kind(),
            ValidationError::InvalidPeriod("length 0".into()).kind(),
        ];
        for (idx, kind) in kinds.iter().enumerate() {
            assert!(!kinds[idx + 1..].contains(kind), "duplicate kind {kind}");
        }
    }

    #[test]
    fn should_forward_kind_through_top_level_error() {
        let err: PowerLogError = ValidationError::InvalidState("dimmed".into()).into();
        assert_eq!(err.kind(), "invalid_state");
        assert!(matches!(
            err,
            PowerLogError::Validation(ValidationError::InvalidState(_))
        ));
    }

    #[test]
    fn should_display_timestamp_bounds() {
        let err = ValidationError::TimestampOutOfRange {
            timestamp: 1500,
            min: 0,
            max: 1440,
        };
        assert_eq!(err.to_string(), "timestamp 1500 outside of [0, 1440]");
    }

    #[test]
    fn should_display_day_bounds() {
        let err = ValidationError::InvalidDay {
            day: "366".into(),
            first: 1,
            last: 365,
        };
        assert_eq!(err.to_string(), "day 366 outside of [1, 365]");
    }

    #[test]
    fn should_report_source_kind_for_boxed_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = PowerLogError::Source(Box::new(io));
        assert_eq!(err.kind(), "source");
        assert_eq!(err.to_string(), "profile source error");
    }
}
