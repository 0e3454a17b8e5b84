use crate::error::{HydrationError, Result};
use crate::models::{FieldValue, Record};
use serde::de::DeserializeOwned;

/// Restrictive record wrapper hydrated one level deeper than a plain entity.
///
/// Reading or writing a field that was pruned from the instance, or that the
/// entity never declared, fails with `UndeclaredProperty`.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    record: Record,
}

impl View {
    pub fn new(record: Record) -> Self {
        Self { record }
    }

    pub fn entity(&self) -> &'static str {
        self.record.entity()
    }

    /// Value of a declared field; `None` when the field holds no value yet
    pub fn get(&self, field: &str) -> Result<Option<&FieldValue>> {
        self.guard(field)?;
        Ok(self.record.get(field))
    }

    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.guard(field)?;
        self.record.set(field, value);
        Ok(())
    }

    fn guard(&self, field: &str) -> Result<()> {
        if self.record.is_present(field) {
            Ok(())
        } else {
            Err(HydrationError::undeclared_property(self.entity(), field))
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        self.record.into_typed()
    }
}
