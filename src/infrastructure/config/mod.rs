//! Infrastructure configuration modules.

pub mod cache;
pub mod database;
pub mod logging;
pub mod settings;
