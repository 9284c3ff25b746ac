//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`venue`] - In-memory [`SourceVenue`](crate::port::SourceVenue) and
//!   [`TargetVenue`](crate::port::TargetVenue) with call recording.
//! - [`domain`] - Builders for instruments, constraints and markets.
//! - [`config`] - Canonical test configuration.
//! - [`operator`] - Scripted approval and in-memory report.

pub mod config;
pub mod domain;
pub mod operator;
pub mod venue;
