//! Application services (use cases).
//!
//! These services orchestrate domain logic over the outbound ports.

pub mod analytics;
