//! # Registration Enforcer
//!
//! Guards against conflicting entity registrations. Each concrete,
//! non-synthetic entity is inspected once; violations are logged and kept for
//! inspection but never abort hydration.

use crate::models::EntityDescriptor;
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::warn;

/// Problem found while registering an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnforcementViolation {
    /// Two different descriptors share one entity name
    DuplicateRegistration { entity: String },
    /// A field is declared twice by the same descriptor
    DuplicateField { entity: String, field: String },
    /// The descriptor never declared its schema/table identity
    AbstractTable { entity: String },
}

impl fmt::Display for EnforcementViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRegistration { entity } => {
                write!(f, "entity {entity} is registered by more than one descriptor")
            }
            Self::DuplicateField { entity, field } => {
                write!(f, "entity {entity} declares field '{field}' more than once")
            }
            Self::AbstractTable { entity } => {
                write!(f, "entity {entity} does not declare its schema and table")
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Enforcer {
    registered: Mutex<HashMap<&'static str, &'static EntityDescriptor>>,
    violations: Mutex<Vec<EnforcementViolation>>,
}

impl Enforcer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the entity on first use; synthetic entities are skipped
    pub fn register(&self, descriptor: &'static EntityDescriptor) {
        if descriptor.effective_capability().is_synthetic() {
            return;
        }

        let conflicting = {
            let mut registered = self.registered.lock();
            match registered.entry(descriptor.name()) {
                Entry::Occupied(entry) if std::ptr::eq(*entry.get(), descriptor) => return,
                Entry::Occupied(_) => true,
                Entry::Vacant(entry) => {
                    entry.insert(descriptor);
                    false
                }
            }
        };

        if conflicting {
            self.record(EnforcementViolation::DuplicateRegistration {
                entity: descriptor.name().to_string(),
            });
            return;
        }

        self.inspect(descriptor);
    }

    fn inspect(&self, descriptor: &EntityDescriptor) {
        let mut seen = HashSet::new();
        for field in descriptor.own_fields() {
            if !seen.insert(field.name) {
                self.record(EnforcementViolation::DuplicateField {
                    entity: descriptor.name().to_string(),
                    field: field.name.to_string(),
                });
            }
        }

        if descriptor.has_abstract_identity() {
            self.record(EnforcementViolation::AbstractTable {
                entity: descriptor.name().to_string(),
            });
        }
    }

    fn record(&self, violation: EnforcementViolation) {
        warn!(violation = %violation, "Entity registration violation");
        self.violations.lock().push(violation);
    }

    pub fn is_registered(&self, entity: &str) -> bool {
        self.registered.lock().contains_key(entity)
    }

    /// Violations recorded so far
    pub fn violations(&self) -> Vec<EnforcementViolation> {
        self.violations.lock().clone()
    }
}
