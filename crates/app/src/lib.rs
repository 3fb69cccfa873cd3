//! # powerlog-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ProfileSource` — produce the profile a request is evaluated against
//! - Define **driving/inbound ports** as use-case structs:
//!   - `UsageService` — usage, savings, per-day usage and day reports
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (`InMemoryProfileSource`)
//!
//! ## Dependency rule
//! Depends on `powerlog-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod in_memory;
pub mod ports;
pub mod services;
