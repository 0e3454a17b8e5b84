#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Entity Hydrator
//!
//! Builds typed, nested domain entities from flat database rows.
//!
//! ## Overview
//!
//! A query returns rows: flat mappings from column name to value. Domain code
//! wants entities, with related entities nested inside them. The hydrator
//! bridges the two using a static, per-entity mapping declaration:
//!
//! - **Plain columns** bind one origin column to one field, with a type tag and
//!   a nullability flag
//! - **Constraints** link to another entity; their column may carry an encoded
//!   sequence, an encoded record, or a plain join key whose related columns sit
//!   in the same row
//! - **Embedded fields** take one column, optionally JSON-decoded and
//!   optionally hydrated as a nested entity or a sequence of them
//! - **Complex fields** hydrate a composite sub-entity from the whole row
//!
//! Recursion through relations and complex fields is bounded by a maximum
//! depth, so cyclic relations terminate. Embedded documents restart the count.
//!
//! ## Module Organization
//!
//! - [`models`] - Entity descriptors, the `Entity` trait and hydrated records
//! - [`mapping`] - Mapping declarations and column type tags
//! - [`row`] - Row values at the database boundary
//! - [`hydration`] - The engine, metadata cache, strictness and enforcement
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use entity_hydrator::mapping::{Column, DbType, Mapper};
//! use entity_hydrator::models::{Entity, EntityDescriptor, FieldDecl};
//! use entity_hydrator::row::{ColumnValue, Row};
//! use serde::Deserialize;
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
//!     .fields(PERSON_FIELDS)
//!     .mapper(person_mapper);
//!
//! #[derive(Debug, Deserialize)]
//! struct Person {
//!     id: i64,
//!     name: Option<String>,
//! }
//!
//! impl Entity for Person {
//!     fn descriptor() -> &'static EntityDescriptor {
//!         &PERSON
//!     }
//! }
//!
//! let row = Row::new()
//!     .with("person_id", 7)
//!     .with("person_name", ColumnValue::Null);
//! let person = Person::from_row(&row)?;
//! assert_eq!(person.id, 7);
//! assert!(person.name.is_none());
//! # Ok::<(), entity_hydrator::HydrationError>(())
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod hydration;
pub mod logging;
pub mod mapping;
pub mod models;
pub mod row;

pub use config::{AbsentConstraintPolicy, HydrationConfig};
pub use error::{HydrationError, Result};
pub use hydration::{
    EnforcementViolation, Enforcer, EntityMetadata, HydrationContext, Hydrator, MetadataCache,
    View,
};
pub use mapping::{Column, Complex, Constraint, DbType, Embedded, Join, LocalColumn, Mapper};
pub use models::{Capability, Entity, EntityDescriptor, FieldDecl, FieldValue, Record, Slot};
pub use row::{ColumnValue, Row, Scalar};
