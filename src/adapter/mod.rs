//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - The command-line interface driving the analytics service
//! - [`outbound`] - SQLite and in-memory storage behind the outbound ports

pub mod inbound;
pub mod outbound;
