//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`clock`] - A [`Clock`](crate::port::outbound::clock::Clock) pinned to
//!   one instant.
//! - [`store`] - An in-memory record store and entity directory.
//! - [`domain`] - Builders for appointment, staff, and service records.

pub mod clock;
pub mod domain;
pub mod store;
