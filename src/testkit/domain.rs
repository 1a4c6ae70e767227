//! Builders for records used across tests.
//!
//! Appointments carry their date under the default `appointmentDate`
//! metadata key.

use serde_json::Value;

use crate::domain::Record;

const DATE_FIELD: &str = "appointmentDate";

/// An appointment on `date` with extra metadata merged from `meta`.
///
/// `meta` must be a JSON object; anything else is ignored.
pub fn appointment(id: i64, date: &str, meta: Value) -> Record {
    let mut record = Record::new(id, "appointment");
    record.title = format!("Appointment #{id}");
    if let Value::Object(fields) = meta {
        record.meta = fields;
    }
    record
        .meta
        .insert(DATE_FIELD.to_string(), Value::String(date.to_string()));
    record
}

/// An appointment at `datetime` with no associations.
pub fn appointment_on(id: i64, datetime: &str) -> Record {
    appointment(id, datetime, Value::Null)
}

/// Replace a record's status.
pub fn with_status(mut record: Record, status: &str) -> Record {
    record.status = status.to_string();
    record
}

/// A staff member with an `assignedServices` list.
pub fn staff(id: i64, name: &str, assigned_services: Value) -> Record {
    let mut record = Record::new(id, "staff");
    record.title = name.to_string();
    record
        .meta
        .insert("assignedServices".to_string(), assigned_services);
    record
}

/// A service with a `serviceStaff` list.
pub fn service(id: i64, title: &str, service_staff: Value) -> Record {
    let mut record = Record::new(id, "service");
    record.title = title.to_string();
    record.meta.insert("serviceStaff".to_string(), service_staff);
    record
}
