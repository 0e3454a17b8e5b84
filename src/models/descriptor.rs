//! # Entity Descriptors
//!
//! Static, compile-time declaration of a domain type: its table identity, the
//! fields it declares, its parent type, its strictness capability and the
//! factory that produces its mapping declaration.
//!
//! ```rust
//! use entity_hydrator::mapping::{Column, DbType, Mapper};
//! use entity_hydrator::models::{Capability, EntityDescriptor, FieldDecl};
//!
//! const PERSON_FIELDS: &[FieldDecl] = &[FieldDecl::new("id"), FieldDecl::new("name")];
//!
//! fn person_mapper() -> Mapper {
//!     Mapper::new()
//!         .column("id", Column::new("person_id", DbType::Int).not_null())
//!         .column("name", Column::new("person_name", DbType::Varchar))
//! }
//!
//! static PERSON: EntityDescriptor = EntityDescriptor::new("Person")
//!     .table("public", "person")
//!     .capability(Capability::Default)
//!     .fields(PERSON_FIELDS)
//!     .mapper(person_mapper);
//!
//! assert_eq!(PERSON.table_name(), "public.person");
//! ```

use super::Record;
use crate::constants::ABSTRACT_IDENTITY;
use crate::error::Result;
use crate::mapping::Mapper;
use crate::row::ColumnValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Hook invoked instead of the default assignment of a plain column
pub type Setter = fn(&mut Record, &ColumnValue) -> Result<()>;

/// Hook invoked instead of the default assignment of a joined or row-wide relation
pub type RelationSetter = fn(&mut Record, Record) -> Result<()>;

/// Hook invoked once a record is fully hydrated
pub type PostProcessor = fn(&mut Record) -> Result<()>;

pub type MapperFactory = fn() -> Mapper;

/// Strictness capability of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Unknown columns are ignored and missing columns tolerated
    #[default]
    Default,
    /// Only fields declared by the type and its declared-only ancestors take part
    DeclaredOnly,
    /// Every field must be mapped and every mapped column supplied
    Full,
    /// Same contract as `Full`
    StrictlyFilled,
    /// Skips registration enforcement
    Synthetic,
}

impl Capability {
    pub fn is_declared_only(&self) -> bool {
        matches!(self, Self::DeclaredOnly)
    }

    /// Check if the mapping must cover the instance and the row must cover the mapping
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Full | Self::StrictlyFilled)
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::DeclaredOnly => write!(f, "declared_only"),
            Self::Full => write!(f, "full"),
            Self::StrictlyFilled => write!(f, "strictly_filled"),
            Self::Synthetic => write!(f, "synthetic"),
        }
    }
}

/// Field declared directly by an entity
#[derive(Clone, Copy)]
pub struct FieldDecl {
    pub name: &'static str,
    /// Caller-supplied default, kept unless a non-null value arrives
    pub default: Option<fn() -> Value>,
    pub setter: Option<Setter>,
    pub relation_setter: Option<RelationSetter>,
}

impl FieldDecl {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            default: None,
            setter: None,
            relation_setter: None,
        }
    }

    pub const fn with_default(self, default: fn() -> Value) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub const fn with_setter(self, setter: Setter) -> Self {
        Self {
            setter: Some(setter),
            ..self
        }
    }

    /// Receives the related record when a constraint is hydrated from the current row
    pub const fn with_relation_setter(self, setter: RelationSetter) -> Self {
        Self {
            relation_setter: Some(setter),
            ..self
        }
    }
}

impl fmt::Debug for FieldDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDecl")
            .field("name", &self.name)
            .field("has_default", &self.default.is_some())
            .field("has_setter", &self.setter.is_some())
            .field("has_relation_setter", &self.relation_setter.is_some())
            .finish()
    }
}

/// Static declaration of a domain type
pub struct EntityDescriptor {
    name: &'static str,
    scheme: &'static str,
    table: &'static str,
    capability: Capability,
    parent: Option<&'static EntityDescriptor>,
    fields: &'static [FieldDecl],
    mapper: Option<MapperFactory>,
    post_processing: Option<PostProcessor>,
}

impl EntityDescriptor {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            scheme: ABSTRACT_IDENTITY,
            table: ABSTRACT_IDENTITY,
            capability: Capability::Default,
            parent: None,
            fields: &[],
            mapper: None,
            post_processing: None,
        }
    }

    pub const fn table(self, scheme: &'static str, table: &'static str) -> Self {
        Self {
            scheme,
            table,
            ..self
        }
    }

    pub const fn capability(self, capability: Capability) -> Self {
        Self { capability, ..self }
    }

    /// Inherit the fields (and, when unset, the capability) of `parent`
    pub const fn extends(self, parent: &'static EntityDescriptor) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }

    pub const fn fields(self, fields: &'static [FieldDecl]) -> Self {
        Self { fields, ..self }
    }

    pub const fn mapper(self, mapper: MapperFactory) -> Self {
        Self {
            mapper: Some(mapper),
            ..self
        }
    }

    pub const fn post_processing(self, hook: PostProcessor) -> Self {
        Self {
            post_processing: Some(hook),
            ..self
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    /// Qualified `scheme.table` identity; informational only
    pub fn table_name(&self) -> String {
        format!("{}.{}", self.scheme, self.table)
    }

    pub fn has_abstract_identity(&self) -> bool {
        self.scheme == ABSTRACT_IDENTITY || self.table == ABSTRACT_IDENTITY
    }

    pub fn parent(&self) -> Option<&'static EntityDescriptor> {
        self.parent
    }

    pub fn own_fields(&self) -> &'static [FieldDecl] {
        self.fields
    }

    pub fn mapper_factory(&self) -> Option<MapperFactory> {
        self.mapper
    }

    /// Capability of this type; a type declaring none inherits its parent's
    pub fn effective_capability(&self) -> Capability {
        match (self.capability, self.parent) {
            (Capability::Default, Some(parent)) => parent.effective_capability(),
            (capability, _) => capability,
        }
    }

    /// Every field an instance carries, own declarations first
    pub fn instance_fields(&self) -> Vec<&'static FieldDecl> {
        let mut fields: Vec<&'static FieldDecl> = Vec::new();
        let mut current = Some(self);
        while let Some(descriptor) = current {
            for field in descriptor.fields {
                if !fields.iter().any(|known| known.name == field.name) {
                    fields.push(field);
                }
            }
            current = descriptor.parent;
        }
        fields
    }

    /// Nearest declaration of `name` along the inheritance chain
    pub fn field(&self, name: &str) -> Option<&'static FieldDecl> {
        let mut current = Some(self);
        while let Some(descriptor) = current {
            if let Some(field) = descriptor.fields.iter().find(|field| field.name == name) {
                return Some(field);
            }
            current = descriptor.parent;
        }
        None
    }

    /// Field names owned by a declared-only type: its own declarations plus
    /// those of each ancestor, stopping at the first ancestor that is not
    /// declared-only. `None` for every other capability.
    pub fn declared_field_names(&self) -> Option<BTreeSet<&'static str>> {
        if !self.effective_capability().is_declared_only() {
            return None;
        }

        let mut declared = BTreeSet::new();
        let mut current = self;
        loop {
            declared.extend(current.fields.iter().map(|field| field.name));
            match current.parent {
                Some(parent) if parent.effective_capability().is_declared_only() => {
                    current = parent;
                }
                _ => break,
            }
        }
        Some(declared)
    }

    /// Nearest post-processing hook along the inheritance chain
    pub fn post_processor(&self) -> Option<PostProcessor> {
        let mut current = Some(self);
        while let Some(descriptor) = current {
            if descriptor.post_processing.is_some() {
                return descriptor.post_processing;
            }
            current = descriptor.parent;
        }
        None
    }
}

impl fmt::Debug for EntityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("name", &self.name)
            .field("table", &self.table_name())
            .field("capability", &self.capability)
            .field("parent", &self.parent.map(|parent| parent.name))
            .field("fields", &self.fields)
            .finish()
    }
}
