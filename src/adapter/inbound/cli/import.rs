//! Handler for `talika-analytics import`.
//!
//! Loads a JSON document of the shape
//! `{ "appointments": [...], "staff": [...], "services": [...] }` into the
//! records table. Each item is `{ id, title?, status?, meta? }`; the entity
//! type comes from the section it appears in.

use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::SqliteRecordStore;
use crate::application::analytics::AnalyticsConfig;
use crate::domain::Record;
use crate::error::Result;
use crate::infrastructure::bootstrap::open_database;
use crate::infrastructure::config::settings::Config;

#[derive(Debug, Default, Deserialize)]
struct ImportDocument {
    #[serde(default)]
    appointments: Vec<ImportItem>,
    #[serde(default)]
    staff: Vec<ImportItem>,
    #[serde(default)]
    services: Vec<ImportItem>,
}

#[derive(Debug, Deserialize)]
struct ImportItem {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    meta: Map<String, Value>,
}

impl ImportItem {
    fn into_record(self, entity_type: &str) -> Record {
        Record {
            id: self.id,
            entity_type: entity_type.to_string(),
            title: self.title,
            status: self.status,
            meta: self.meta,
        }
    }
}

/// Counts of records read per section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ImportSummary {
    appointments: usize,
    staff: usize,
    services: usize,
}

impl ImportSummary {
    const fn total(&self) -> usize {
        self.appointments + self.staff + self.services
    }
}

fn into_records(document: ImportDocument, config: &AnalyticsConfig) -> (Vec<Record>, ImportSummary) {
    let summary = ImportSummary {
        appointments: document.appointments.len(),
        staff: document.staff.len(),
        services: document.services.len(),
    };
    let sections = [
        (document.appointments, config.entity_type.as_str()),
        (document.staff, config.staff_type.as_str()),
        (document.services, config.service_type.as_str()),
    ];
    let records = sections
        .into_iter()
        .flat_map(|(items, entity_type)| {
            items
                .into_iter()
                .map(move |item| item.into_record(entity_type))
        })
        .collect();
    (records, summary)
}

/// Execute `import FILE`.
pub fn execute(config: &Config, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)?;
    let document: ImportDocument = serde_json::from_str(&content)?;
    let (records, summary) = into_records(document, &config.analytics);

    let store = SqliteRecordStore::new(open_database(config)?);
    let written = store.upsert(&records)?;
    info!(
        file = %file.display(),
        records = summary.total(),
        written,
        "Imported records"
    );

    if output::is_json() {
        output::json_output(json!({
            "command": "import",
            "database": config.database.path,
            "appointments": summary.appointments,
            "staff": summary.staff,
            "services": summary.services,
        }));
        return Ok(());
    }

    output::success(&format!(
        "Imported {} appointments, {} staff, {} services into {}",
        summary.appointments, summary.staff, summary.services, config.database.path
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_map_to_configured_entity_types() {
        let document: ImportDocument = serde_json::from_value(json!({
            "appointments": [
                { "id": 1, "status": "approved", "meta": { "appointmentDate": "2024-03-04 09:00:00" } }
            ],
            "staff": [{ "id": 7, "title": "Asha" }],
            "services": [{ "id": 3, "title": "Haircut" }, { "id": 4, "title": "Massage" }]
        }))
        .unwrap();

        let (records, summary) = into_records(document, &AnalyticsConfig::default());

        assert_eq!(summary.total(), 4);
        assert_eq!(records[0].entity_type, "appointment");
        assert_eq!(records[0].status, "approved");
        assert_eq!(records[1].entity_type, "staff");
        assert_eq!(records[1].title, "Asha");
        assert_eq!(records[3].entity_type, "service");
        assert!(records[3].meta.is_empty());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let document: ImportDocument = serde_json::from_str(r#"{ "staff": [] }"#).unwrap();
        let (records, summary) = into_records(document, &AnalyticsConfig::default());

        assert!(records.is_empty());
        assert_eq!(summary, ImportSummary::default());
    }
}
