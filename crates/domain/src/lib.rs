//! # powerlog-domain
//!
//! Pure domain model for powerlog: how long an appliance was powered, and
//! how much downtime its automatic shutoff produced, derived from a sparse
//! log of state changes.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, period configuration
//! - Define **States** (`on`, `off`, `auto-off`) and **Events** (state changes)
//! - Define **Profiles** (initial state + event log) and validate them
//! - Compute single-day **usage** and auto-off **savings**
//! - Slice month-scale logs into days (**epoch**) and build day **reports**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! Every computation is a pure function of its inputs.

pub mod error;
pub mod period;

pub mod epoch;
pub mod event;
pub mod profile;
pub mod report;
pub mod savings;
pub mod state;
pub mod usage;
