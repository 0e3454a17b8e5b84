//! # Domain Models
//!
//! Static entity descriptors, the typed `Entity` trait and the dynamic
//! `Record` every hydration produces before conversion into a typed struct.

pub mod descriptor;
pub mod entity;
pub mod record;

pub use descriptor::{
    Capability, EntityDescriptor, FieldDecl, MapperFactory, PostProcessor, RelationSetter, Setter,
};
pub use entity::Entity;
pub use record::{FieldValue, Record, Slot};
