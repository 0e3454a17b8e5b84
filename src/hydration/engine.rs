//! # Hydration Engine
//!
//! Builds one `Record` from one row, resolving nested entities recursively
//! and depth-first. Each call walks the same fixed sequence:
//!
//! ```text
//! PruneDeclared -> StrictCheck -> BaseColumns -> Constraints -> Embedded -> Complex -> PostProcess
//! ```
//!
//! The first failure aborts the whole call; there is no partial result.

use super::context::HydrationContext;
use super::enforcer::Enforcer;
use super::metadata::{EntityMetadata, MetadataCache};
use super::strictness;
use super::view::View;
use crate::config::{AbsentConstraintPolicy, HydrationConfig};
use crate::error::{HydrationError, Result};
use crate::logging::{log_error, log_hydration_operation};
use crate::models::{Entity, EntityDescriptor, Record};
use crate::row::{ColumnValue, Row, Scalar};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tracing::{debug, trace};

static GLOBAL_HYDRATOR: OnceLock<Hydrator> = OnceLock::new();

/// Shape of the data found in a constraint's local column
enum RelationData<'a> {
    Absent,
    Sequence(Cow<'a, [Value]>),
    Single(Cow<'a, Map<String, Value>>),
    /// A plain join key; related columns sit in the current row
    Joined,
}

impl<'a> RelationData<'a> {
    fn classify(value: Option<&'a ColumnValue>) -> Self {
        match value {
            None | Some(ColumnValue::Null) => Self::Absent,
            Some(ColumnValue::Sequence(items)) => Self::Sequence(Cow::Borrowed(items.as_slice())),
            Some(ColumnValue::Record(map)) => Self::Single(Cow::Borrowed(map)),
            Some(ColumnValue::Encoded(text)) | Some(ColumnValue::Scalar(Scalar::Text(text))) => {
                Self::parse(text)
            }
            Some(ColumnValue::Scalar(_)) => Self::Joined,
        }
    }

    /// Text that does not decode to a sequence or record is a join key
    fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => Self::Sequence(Cow::Owned(items)),
            Ok(Value::Object(map)) => Self::Single(Cow::Owned(map)),
            _ => Self::Joined,
        }
    }
}

/// Hydrates rows into records and typed entities.
///
/// A hydrator owns its metadata cache; the process-wide instance returned by
/// [`Hydrator::global`] backs the `Entity` convenience methods.
#[derive(Debug)]
pub struct Hydrator {
    config: HydrationConfig,
    metadata: MetadataCache,
    enforcer: Enforcer,
}

impl Hydrator {
    pub fn new(config: HydrationConfig) -> Self {
        Self {
            config,
            metadata: MetadataCache::new(),
            enforcer: Enforcer::new(),
        }
    }

    /// Process-wide hydrator configured from the environment
    pub fn global() -> &'static Hydrator {
        GLOBAL_HYDRATOR.get_or_init(|| {
            let config = HydrationConfig::from_environment();
            config.log_configuration();
            Hydrator::new(config)
        })
    }

    pub fn config(&self) -> &HydrationConfig {
        &self.config
    }

    pub fn metadata(&self) -> &MetadataCache {
        &self.metadata
    }

    pub fn enforcer(&self) -> &Enforcer {
        &self.enforcer
    }

    /// Top-level context derived from the configuration
    pub fn context(&self) -> HydrationContext {
        HydrationContext::from_config(&self.config)
    }

    /// Context of view hydration, which starts one level deeper
    pub fn view_context(&self) -> HydrationContext {
        self.context()
            .with_current_depth(self.config.view_start_depth)
    }

    /// Metadata of the entity, built on first use
    pub fn resolve(&self, descriptor: &'static EntityDescriptor) -> Result<Arc<EntityMetadata>> {
        self.metadata.resolve(descriptor)
    }

    pub fn hydrate<T: Entity>(&self, row: Option<&Row>) -> Result<T> {
        self.hydrate_with(row, self.context())
    }

    pub fn hydrate_with<T: Entity>(&self, row: Option<&Row>, context: HydrationContext) -> Result<T> {
        self.hydrate_record(T::descriptor(), row, context)?
            .into_typed()
    }

    /// Hydrate every row in order, stopping at the first failure
    pub fn hydrate_all<T: Entity>(&self, rows: &[Row]) -> Result<Vec<T>> {
        let entity = T::descriptor().name();
        let started = Instant::now();
        let result = rows
            .iter()
            .map(|row| self.hydrate(Some(row)))
            .collect::<Result<Vec<T>>>();
        let duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

        match &result {
            Ok(records) => log_hydration_operation(
                "hydrate_all",
                entity,
                Some(self.config.max_depth),
                "completed",
                Some(duration_us),
                Some(&format!("{} rows", records.len())),
            ),
            Err(err) => {
                log_error("hydrator", "hydrate_all", &err.to_string(), Some(entity));
                log_hydration_operation(
                    "hydrate_all",
                    entity,
                    Some(self.config.max_depth),
                    "failed",
                    Some(duration_us),
                    None,
                );
            }
        }

        result
    }

    /// Hydrate a row as a view with guarded field access
    pub fn view(&self, descriptor: &'static EntityDescriptor, row: Option<&Row>) -> Result<View> {
        self.hydrate_record(descriptor, row, self.view_context())
            .map(View::new)
    }

    /// Build one record of `descriptor` from `row`.
    ///
    /// An absent row yields an instance without any populated field, as does
    /// a context that is already past its maximum depth.
    pub fn hydrate_record(
        &self,
        descriptor: &'static EntityDescriptor,
        row: Option<&Row>,
        context: HydrationContext,
    ) -> Result<Record> {
        if self.config.enforce_registration {
            self.enforcer.register(descriptor);
        }

        let metadata = self.metadata.resolve(descriptor)?;
        let mut record = Record::new(descriptor);

        for field in metadata.unset_fields() {
            record.unset(field);
        }

        strictness::check_mapped_properties(&metadata)?;

        let Some(row) = row else {
            return Ok(record);
        };

        if !context.within_bounds() {
            debug!(
                entity = descriptor.name(),
                depth = context.current_depth,
                max_depth = context.max_depth,
                "Depth bound reached, record left unpopulated"
            );
            return Ok(record);
        }

        trace!(
            entity = descriptor.name(),
            depth = context.current_depth,
            columns = row.len(),
            "Hydrating record"
        );

        let nested = context.descend();
        self.set_base_columns(&mut record, descriptor, &metadata, row)?;
        self.set_constraints(&mut record, descriptor, &metadata, row, nested)?;
        self.set_embedded(&mut record, &metadata, row, nested)?;
        self.set_complex(&mut record, &metadata, row, nested)?;

        if let Some(post_process) = descriptor.post_processor() {
            post_process(&mut record)?;
        }

        Ok(record)
    }

    fn set_base_columns(
        &self,
        record: &mut Record,
        descriptor: &'static EntityDescriptor,
        metadata: &EntityMetadata,
        row: &Row,
    ) -> Result<()> {
        strictness::check_required_columns(metadata, row)?;

        for (origin, field) in metadata.reverse_map() {
            let Some(value) = row.get(origin) else {
                continue;
            };
            if !record.is_present(field) {
                continue;
            }
            let Some(column) = metadata.mapper().column_for(field) else {
                continue;
            };

            strictness::check_nullability(metadata, column, value)?;

            if let Some(setter) = descriptor.field(field).and_then(|decl| decl.setter) {
                setter(record, value)?;
            } else if column.db_type.is_json() {
                let decoded = decode_json(metadata.entity(), origin, value)?;
                record.set(field, decoded);
            } else if !record.is_set(field) && !value.is_null() {
                // first non-null value wins; defaults survive null cells
                record.set(field, value.to_json());
            }
        }

        Ok(())
    }

    fn set_constraints(
        &self,
        record: &mut Record,
        descriptor: &'static EntityDescriptor,
        metadata: &EntityMetadata,
        row: &Row,
        nested: HydrationContext,
    ) -> Result<()> {
        for (field, constraint) in metadata.mapper().constraints() {
            if !record.is_present(field) {
                continue;
            }

            let target = constraint.entity;
            let data = RelationData::classify(row.get(constraint.local_column.name()));

            match data {
                RelationData::Sequence(items) => {
                    if !constraint.join.is_collection() {
                        return Err(HydrationError::unexpected_array(metadata.entity(), field));
                    }
                    if !self.may_descend(metadata, field, nested) {
                        continue;
                    }
                    let records = items
                        .iter()
                        .map(|item| {
                            let nested_row = element_row(metadata.entity(), field, item)?;
                            self.hydrate_record(target, Some(&nested_row), nested)
                        })
                        .collect::<Result<Vec<_>>>()?;
                    record.set(field, records);
                }
                RelationData::Single(map) => {
                    if !self.may_descend(metadata, field, nested) {
                        continue;
                    }
                    let nested_row = Row::from(map.into_owned());
                    let related = self.hydrate_record(target, Some(&nested_row), nested)?;
                    record.set(field, related);
                }
                RelationData::Joined => {
                    if !self.may_descend(metadata, field, nested) {
                        continue;
                    }
                    let related = self.hydrate_record(target, Some(row), nested)?;
                    assign_relation(record, descriptor, field, related)?;
                }
                RelationData::Absent => {
                    if nested.absent_constraints != AbsentConstraintPolicy::HydrateFromRow
                        || record.is_set(field)
                        || !self.may_descend(metadata, field, nested)
                    {
                        continue;
                    }
                    let related = self.hydrate_record(target, Some(row), nested)?;
                    assign_relation(record, descriptor, field, related)?;
                }
            }
        }

        Ok(())
    }

    fn set_embedded(
        &self,
        record: &mut Record,
        metadata: &EntityMetadata,
        row: &Row,
        nested: HydrationContext,
    ) -> Result<()> {
        for (field, embedded) in metadata.mapper().embedded_fields() {
            if !record.is_present(field) {
                continue;
            }
            let Some(raw) = row.present(&embedded.name) else {
                continue;
            };

            let value = if embedded.is_json() {
                decode_json(metadata.entity(), &embedded.name, raw)?
            } else {
                raw.to_json()
            };

            let Some(target) = embedded.entity else {
                record.set(field, value);
                continue;
            };
            // embedded documents start their own depth count
            let context = HydrationContext::new(nested.max_depth, 0)
                .with_policy(nested.absent_constraints);

            if embedded.iterable {
                let Value::Array(items) = value else {
                    return Err(HydrationError::malformed_value(
                        metadata.entity(),
                        field,
                        "a sequence of records",
                    ));
                };
                let records = items
                    .iter()
                    .map(|item| {
                        let nested_row = element_row(metadata.entity(), field, item)?;
                        self.hydrate_record(target, Some(&nested_row), context)
                    })
                    .collect::<Result<Vec<_>>>()?;
                record.set(field, records);
            } else {
                let nested_row = element_row(metadata.entity(), field, &value)?;
                let related = self.hydrate_record(target, Some(&nested_row), context)?;
                record.set(field, related);
            }
        }

        Ok(())
    }

    fn set_complex(
        &self,
        record: &mut Record,
        metadata: &EntityMetadata,
        row: &Row,
        nested: HydrationContext,
    ) -> Result<()> {
        for (field, complex) in metadata.mapper().complex_fields() {
            if !record.is_present(field) || !self.may_descend(metadata, field, nested) {
                continue;
            }
            let composite = self.hydrate_record(complex.entity, Some(row), nested)?;
            record.set(field, composite);
        }

        Ok(())
    }

    fn may_descend(&self, metadata: &EntityMetadata, field: &str, nested: HydrationContext) -> bool {
        if nested.within_bounds() {
            return true;
        }
        debug!(
            entity = metadata.entity(),
            field = field,
            depth = nested.current_depth,
            max_depth = nested.max_depth,
            "Skipping nested hydration beyond depth bound"
        );
        false
    }
}

impl Default for Hydrator {
    fn default() -> Self {
        Self::new(HydrationConfig::default())
    }
}

fn decode_json(entity: &str, column: &str, value: &ColumnValue) -> Result<Value> {
    value
        .decode_json()
        .map_err(|err| HydrationError::malformed_json(entity, column, err.to_string()))
}

fn assign_relation(
    record: &mut Record,
    descriptor: &'static EntityDescriptor,
    field: &str,
    related: Record,
) -> Result<()> {
    match descriptor.field(field).and_then(|decl| decl.relation_setter) {
        Some(setter) => setter(record, related),
        None => {
            record.set(field, related);
            Ok(())
        }
    }
}

/// Row of a nested element; only JSON objects describe an entity
fn element_row(entity: &str, field: &str, item: &Value) -> Result<Row> {
    match item {
        Value::Object(map) => Ok(Row::from(map.clone())),
        _ => Err(HydrationError::malformed_value(entity, field, "a record")),
    }
}
