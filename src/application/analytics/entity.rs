//! Per-customer, per-staff, and per-service appointment counts.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::domain::entity::associated_label;
use crate::domain::record::{id_string, is_present, Association};
use crate::domain::{Dimension, EntityAggregate, LabelSource, Record};
use crate::error::Result;
use crate::port::outbound::store::{EntityDirectory, RecordStore};

use super::config::AnalyticsConfig;

/// Staff metadata listing the services a staff member performs.
const ASSIGNED_SERVICES: &str = "assignedServices";
const SERVICE_ID: &str = "serviceID";
/// Service metadata listing the staff who perform it.
const SERVICE_STAFF: &str = "serviceStaff";
const STAFF_ID: &str = "staffId";
const CATEGORY: &str = "category";

/// Groups appointments by the customer, staff member, or service they
/// reference.
#[derive(Clone)]
pub struct EntityAggregator {
    store: Arc<dyn RecordStore>,
    directory: Arc<dyn EntityDirectory>,
    entity_type: String,
    date_field: String,
    staff_type: String,
    service_type: String,
    label_source: LabelSource,
}

impl EntityAggregator {
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        directory: Arc<dyn EntityDirectory>,
        config: &AnalyticsConfig,
    ) -> Self {
        Self {
            store,
            directory,
            entity_type: config.entity_type.clone(),
            date_field: config.date_field.clone(),
            staff_type: config.staff_type.clone(),
            service_type: config.service_type.clone(),
            label_source: config.label_source,
        }
    }

    /// Aggregate appointments dated within `[start, end]` by `dimension`.
    ///
    /// Appointments without a resolvable association are skipped. The
    /// result is ordered by first occurrence.
    ///
    /// # Errors
    /// Returns an error if the record store or directory fails.
    pub fn aggregate(
        &self,
        dimension: Dimension,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EntityAggregate>> {
        let records = self.appointments(start, end)?;

        let mut aggregates: Vec<EntityAggregate> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut skipped = 0usize;

        for record in &records {
            let Some(association) = associate(record, dimension) else {
                skipped += 1;
                continue;
            };
            if let Some(&position) = positions.get(&association.id) {
                aggregates[position].count += 1;
                continue;
            }
            let aggregate = self.first_occurrence(dimension, record, &association)?;
            positions.insert(association.id, aggregates.len());
            aggregates.push(aggregate);
        }

        debug!(
            dimension = %dimension,
            records = records.len(),
            entities = aggregates.len(),
            skipped,
            "Aggregated appointments by entity"
        );
        Ok(aggregates)
    }

    /// Distinct entity ids referenced by appointments dated within
    /// `[start, end]`, without directory lookups.
    ///
    /// # Errors
    /// Returns an error if the record store fails.
    pub fn distinct_ids(
        &self,
        dimension: Dimension,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeSet<String>> {
        Ok(self
            .appointments(start, end)?
            .iter()
            .filter_map(|record| associate(record, dimension))
            .map(|association| association.id)
            .collect())
    }

    fn appointments(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Record>> {
        self.store
            .query_records(&self.entity_type, &self.date_field, start, end)
    }

    fn first_occurrence(
        &self,
        dimension: Dimension,
        appointment: &Record,
        association: &Association,
    ) -> Result<EntityAggregate> {
        match dimension {
            Dimension::Customer => Ok(EntityAggregate::new(
                association.id.clone(),
                association.label.clone(),
            )),
            Dimension::Staff => {
                let staff = self.directory.find(&self.staff_type, &association.id)?;
                let mut aggregate =
                    EntityAggregate::new(association.id.clone(), display_name(staff.as_ref(), association));
                if let Some(staff) = staff {
                    aggregate.image = profile_image(&staff);
                    aggregate.associated_label =
                        self.list_label(&staff, ASSIGNED_SERVICES, SERVICE_ID, &self.service_type)?;
                }
                Ok(aggregate)
            }
            Dimension::Service => {
                let service = self.directory.find(&self.service_type, &association.id)?;
                let mut aggregate = EntityAggregate::new(
                    association.id.clone(),
                    display_name(service.as_ref(), association),
                );
                aggregate.category = appointment.meta_label(CATEGORY);
                if let Some(service) = service {
                    aggregate.associated_label =
                        self.list_label(&service, SERVICE_STAFF, STAFF_ID, &self.staff_type)?;
                }
                Ok(aggregate)
            }
        }
    }

    /// Label naming one entry of the list stored under `list_key`.
    ///
    /// Every non-empty entry counts towards the total. Only the named entry
    /// is looked up, and an id with no record of `target_type` gives an
    /// empty title.
    fn list_label(
        &self,
        owner: &Record,
        list_key: &str,
        id_key: &str,
        target_type: &str,
    ) -> Result<String> {
        let Some(entries) = owner.meta(list_key).and_then(Value::as_array) else {
            return Ok(String::new());
        };

        let present: Vec<&Value> = entries.iter().filter(|entry| is_present(entry)).collect();
        let chosen = match self.label_source {
            LabelSource::First => present.first(),
            LabelSource::Last => present.last(),
        };
        let Some(chosen) = chosen else {
            return Ok(String::new());
        };

        let title = match chosen.get(id_key).and_then(id_string) {
            Some(id) => self
                .directory
                .find(target_type, &id)?
                .map(|target| target.title)
                .unwrap_or_default(),
            None => String::new(),
        };
        Ok(associated_label(&title, present.len()))
    }
}

/// Resolve the entity an appointment references along `dimension`.
fn associate(record: &Record, dimension: Dimension) -> Option<Association> {
    match dimension {
        Dimension::Customer => record.first_association(dimension.meta_key()),
        Dimension::Staff | Dimension::Service => record.association(dimension.meta_key()),
    }
}

fn display_name(entity: Option<&Record>, association: &Association) -> String {
    if !association.label.is_empty() {
        return association.label.clone();
    }
    entity.map(|record| record.title.clone()).unwrap_or_default()
}

fn profile_image(staff: &Record) -> Option<String> {
    staff
        .meta("additionalInformations")?
        .get("staffProfileImage")?
        .get(0)?
        .get("thumb")?
        .as_str()
        .filter(|thumb| !thumb.is_empty())
        .map(str::to_string)
}
