//! Port definitions for the analytics engine.
//!
//! Outbound ports describe the collaborators the engine consumes: the
//! record store, the entity directory, the grouped-row cache, and the clock.

pub mod outbound;
