//! Profile — an initial state followed by an ordered log of state changes.
//!
//! Profiles usually arrive as untyped JSON from a host application.
//! [`Profile::from_value`] is the validation boundary: once a [`Profile`]
//! exists, every state in it is a known [`ApplianceState`] and the
//! computations only have to check timestamps against their own window.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PowerLogError, ValidationError};
use crate::event::Event;
use crate::state::ApplianceState;

/// Initial state plus the state changes recorded after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub initial: ApplianceState,
    pub events: Vec<Event>,
}

impl Profile {
    /// Create a builder for constructing a [`Profile`].
    #[must_use]
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder::default()
    }

    /// Profile with no recorded state change.
    #[must_use]
    pub fn constant(initial: ApplianceState) -> Self {
        Self {
            initial,
            events: Vec::new(),
        }
    }

    /// Events ordered by timestamp, in a private copy.
    ///
    /// The sort is stable, so events sharing a timestamp keep the order in
    /// which they were recorded. The profile itself is left untouched.
    #[must_use]
    pub fn sorted_events(&self) -> Vec<Event> {
        let mut events = self.events.clone();
        events.sort_by_key(|event| event.timestamp);
        events
    }

    /// Parse and validate a JSON profile document.
    ///
    /// # Errors
    ///
    /// See [`Profile::from_value`].
    pub fn from_json(input: &str) -> Result<Self, PowerLogError> {
        let value: Value = serde_json::from_str(input).map_err(|err| {
            ValidationError::InvalidProfileShape(format!("malformed JSON: {err}"))
        })?;
        Ok(Self::from_value(&value)?)
    }

    /// Validate an untyped profile document.
    ///
    /// Expected shape:
    ///
    /// ```json
    /// { "initial": "off", "events": [{ "state": "on", "timestamp": 30 }] }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidProfileShape`] when `initial` or
    /// `events` is missing or of the wrong type (including non-integer
    /// timestamps), and [`ValidationError::InvalidState`] when a state is not
    /// one of `on`, `off`, `auto-off`.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let object = value
            .as_object()
            .ok_or_else(|| shape("profile must be an object"))?;
        let initial = parse_state(object, "initial")?;
        let events = object
            .get("events")
            .ok_or_else(|| shape("missing `events`"))?
            .as_array()
            .ok_or_else(|| shape("`events` must be an array"))?
            .iter()
            .enumerate()
            .map(|(idx, item)| parse_event(idx, item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { initial, events })
    }
}

fn shape(reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidProfileShape(reason.into())
}

fn parse_state(
    object: &Map<String, Value>,
    key: &str,
) -> Result<ApplianceState, ValidationError> {
    match object.get(key) {
        None => Err(shape(format!("missing `{key}`"))),
        Some(Value::String(raw)) => raw.parse(),
        Some(other) => Err(ValidationError::InvalidState(other.to_string())),
    }
}

fn parse_event(idx: usize, item: &Value) -> Result<Event, ValidationError> {
    let object = item
        .as_object()
        .ok_or_else(|| shape(format!("event {idx} must be an object")))?;
    let state = parse_state(object, "state")?;
    let timestamp = object
        .get("timestamp")
        .ok_or_else(|| shape(format!("event {idx} is missing `timestamp`")))?
        .as_i64()
        .ok_or_else(|| shape(format!("event {idx} timestamp must be an integer")))?;
    Ok(Event { state, timestamp })
}

/// Step-by-step builder for [`Profile`].
#[derive(Debug, Default)]
pub struct ProfileBuilder {
    initial: Option<ApplianceState>,
    events: Vec<Event>,
}

impl ProfileBuilder {
    #[must_use]
    pub fn initial(mut self, initial: ApplianceState) -> Self {
        self.initial = Some(initial);
        self
    }

    #[must_use]
    pub fn event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    #[must_use]
    pub fn events(mut self, events: impl IntoIterator<Item = Event>) -> Self {
        self.events.extend(events);
        self
    }

    /// Consume the builder and return a [`Profile`], defaulting to `off`.
    #[must_use]
    pub fn build(self) -> Profile {
        Profile {
            initial: self.initial.unwrap_or(ApplianceState::Off),
            events: self.events,
        }
    }
}
