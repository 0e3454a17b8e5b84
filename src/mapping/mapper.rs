//! # Mapping Declaration
//!
//! A `Mapper` binds the fields of one entity to origin columns and describes
//! the embedded values, complex composites and relational constraints the
//! hydration engine resolves. Mappers are built once per entity by the
//! descriptor's mapper factory and then consumed read-only.

use super::DbType;
use crate::models::EntityDescriptor;
use std::collections::BTreeMap;

/// Plain column binding of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Origin column name as produced by the database
    pub name: String,
    pub db_type: DbType,
    pub nullable: bool,
}

impl Column {
    /// Create a nullable column binding
    pub fn new(name: impl Into<String>, db_type: DbType) -> Self {
        Self {
            name: name.into(),
            db_type,
            nullable: true,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Field populated from a single column, optionally JSON-decoded and
/// optionally hydrated as a nested entity (or a sequence of them)
#[derive(Debug, Clone)]
pub struct Embedded {
    pub name: String,
    pub db_type: Option<DbType>,
    pub entity: Option<&'static EntityDescriptor>,
    pub iterable: bool,
}

impl Embedded {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            db_type: None,
            entity: None,
            iterable: false,
        }
    }

    pub fn db_type(mut self, db_type: DbType) -> Self {
        self.db_type = Some(db_type);
        self
    }

    /// Decode the column as JSON before use
    pub fn json(self) -> Self {
        self.db_type(DbType::Json)
    }

    /// Hydrate the value as a single nested entity
    pub fn entity(mut self, entity: &'static EntityDescriptor) -> Self {
        self.entity = Some(entity);
        self.iterable = false;
        self
    }

    /// Hydrate every element of the value as a nested entity
    pub fn iterable(mut self, entity: &'static EntityDescriptor) -> Self {
        self.entity = Some(entity);
        self.iterable = true;
        self
    }

    pub fn is_json(&self) -> bool {
        self.db_type.is_some_and(|db_type| db_type.is_json())
    }
}

/// Composite sub-object hydrated from the entire current row
#[derive(Debug, Clone, Copy)]
pub struct Complex {
    pub entity: &'static EntityDescriptor,
}

impl Complex {
    pub fn new(entity: &'static EntityDescriptor) -> Self {
        Self { entity }
    }
}

/// Relation kind of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Join {
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
}

impl Join {
    /// Relations that may be populated from a sequence
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

/// Local side of a constraint: a declared column or a raw column name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalColumn {
    Column(Column),
    Name(String),
}

impl LocalColumn {
    pub fn name(&self) -> &str {
        match self {
            Self::Column(column) => &column.name,
            Self::Name(name) => name,
        }
    }
}

impl From<Column> for LocalColumn {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<&str> for LocalColumn {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for LocalColumn {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Relational link from the current entity to a target entity
#[derive(Debug, Clone)]
pub struct Constraint {
    pub local_column: LocalColumn,
    pub join: Join,
    pub entity: &'static EntityDescriptor,
}

impl Constraint {
    pub fn new(
        local_column: impl Into<LocalColumn>,
        join: Join,
        entity: &'static EntityDescriptor,
    ) -> Self {
        Self {
            local_column: local_column.into(),
            join,
            entity,
        }
    }
}

/// Mapping declaration of one entity, keyed by field name
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    columns: BTreeMap<String, Column>,
    embedded: BTreeMap<String, Embedded>,
    complex: BTreeMap<String, Complex>,
    constraints: BTreeMap<String, Constraint>,
}

impl Mapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, field: impl Into<String>, column: Column) -> Self {
        self.columns.insert(field.into(), column);
        self
    }

    pub fn embedded(mut self, field: impl Into<String>, embedded: Embedded) -> Self {
        self.embedded.insert(field.into(), embedded);
        self
    }

    pub fn complex(mut self, field: impl Into<String>, complex: Complex) -> Self {
        self.complex.insert(field.into(), complex);
        self
    }

    pub fn constraint(mut self, field: impl Into<String>, constraint: Constraint) -> Self {
        self.constraints.insert(field.into(), constraint);
        self
    }

    /// Field name -> origin column name for every plain column
    pub fn origin_column_names(&self) -> BTreeMap<String, String> {
        self.columns
            .iter()
            .map(|(field, column)| (field.clone(), column.name.clone()))
            .collect()
    }

    pub fn columns(&self) -> &BTreeMap<String, Column> {
        &self.columns
    }

    pub fn column_for(&self, field: &str) -> Option<&Column> {
        self.columns.get(field)
    }

    pub fn embedded_fields(&self) -> &BTreeMap<String, Embedded> {
        &self.embedded
    }

    pub fn complex_fields(&self) -> &BTreeMap<String, Complex> {
        &self.complex
    }

    pub fn constraints(&self) -> &BTreeMap<String, Constraint> {
        &self.constraints
    }

    /// Whether the field is bound by any kind of declaration
    pub fn covers(&self, field: &str) -> bool {
        self.columns.contains_key(field)
            || self.complex.contains_key(field)
            || self.embedded.contains_key(field)
            || self.constraints.contains_key(field)
    }
}
