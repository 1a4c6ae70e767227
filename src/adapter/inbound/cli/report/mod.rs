//! Report commands: appointments, customers, staff, services, overview.

mod format;
mod handler;
mod json;

pub use handler::{execute_appointments, execute_customers, execute_entities, execute_overview};
