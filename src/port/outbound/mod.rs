//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies such as record
//! storage, grouped-row caching, and wall-clock time.

pub mod cache;
pub mod clock;
pub mod store;
