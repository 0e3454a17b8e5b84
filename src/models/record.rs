//! # Hydrated Records
//!
//! A `Record` is one hydrated instance of an entity. Each instance field lives
//! in a `Slot` that distinguishes fields removed from the instance (`Unset`),
//! fields present without a value (`Vacant`) and populated fields.

use super::EntityDescriptor;
use crate::error::{HydrationError, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Value held by a populated field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Value(Value),
    Entity(Box<Record>),
    Entities(Vec<Record>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Record> {
        match self {
            Self::Entity(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_entities(&self) -> Option<&[Record]> {
        match self {
            Self::Entities(records) => Some(records),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Entity(record) => record.to_json(),
            Self::Entities(records) => Value::Array(records.iter().map(Record::to_json).collect()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Record> for FieldValue {
    fn from(record: Record) -> Self {
        Self::Entity(Box::new(record))
    }
}

impl From<Vec<Record>> for FieldValue {
    fn from(records: Vec<Record>) -> Self {
        Self::Entities(records)
    }
}

/// Storage state of one instance field
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Removed from the instance; never written again
    Unset,
    Vacant,
    Filled(FieldValue),
}

impl Slot {
    /// Check if the slot holds a non-null value
    pub fn holds_value(&self) -> bool {
        matches!(self, Self::Filled(value) if !value.is_null())
    }
}

/// One hydrated instance of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    entity: &'static str,
    slots: BTreeMap<&'static str, Slot>,
}

impl Record {
    /// Fresh instance carrying every instance field and its declared default
    pub fn new(descriptor: &EntityDescriptor) -> Self {
        let slots = descriptor
            .instance_fields()
            .into_iter()
            .map(|field| {
                let slot = match field.default {
                    Some(default) => Slot::Filled(FieldValue::Value(default())),
                    None => Slot::Vacant,
                };
                (field.name, slot)
            })
            .collect();

        Self {
            entity: descriptor.name(),
            slots,
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn slot(&self, field: &str) -> Option<&Slot> {
        self.slots.get(field)
    }

    /// Check if the field exists on the instance and was not unset
    pub fn is_present(&self, field: &str) -> bool {
        matches!(self.slots.get(field), Some(slot) if *slot != Slot::Unset)
    }

    /// Check if the field holds a non-null value
    pub fn is_set(&self, field: &str) -> bool {
        self.slots.get(field).is_some_and(Slot::holds_value)
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        match self.slots.get(field) {
            Some(Slot::Filled(value)) => Some(value),
            _ => None,
        }
    }

    /// Plain value of the field, if it holds one
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.get(field).and_then(FieldValue::as_value)
    }

    pub fn entity_field(&self, field: &str) -> Option<&Record> {
        self.get(field).and_then(FieldValue::as_entity)
    }

    pub fn entities_field(&self, field: &str) -> Option<&[Record]> {
        self.get(field).and_then(FieldValue::as_entities)
    }

    /// Assign a field present on the instance. Returns `false` when the field
    /// is unknown or unset, in which case nothing is written.
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> bool {
        match self.slots.get_mut(field) {
            Some(slot) if *slot != Slot::Unset => {
                *slot = Slot::Filled(value.into());
                true
            }
            _ => false,
        }
    }

    pub(crate) fn unset(&mut self, field: &str) {
        if let Some(slot) = self.slots.get_mut(field) {
            *slot = Slot::Unset;
        }
    }

    /// Names of the fields still present on the instance
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots
            .iter()
            .filter(|(_, slot)| **slot != Slot::Unset)
            .map(|(name, _)| *name)
    }

    /// JSON object of the populated fields; unset and vacant fields are omitted
    pub fn to_json(&self) -> Value {
        let object: Map<String, Value> = self
            .slots
            .iter()
            .filter_map(|(name, slot)| match slot {
                Slot::Filled(value) => Some(((*name).to_string(), value.to_json())),
                Slot::Unset | Slot::Vacant => None,
            })
            .collect();
        Value::Object(object)
    }

    /// Convert into a typed domain struct through serde
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.to_json())
            .map_err(|err| HydrationError::conversion(self.entity, err.to_string()))
    }
}
