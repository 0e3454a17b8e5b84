//! # Mapping Declarations
//!
//! Column type tags and the per-entity `Mapper` that binds fields to origin
//! columns, embedded values, complex composites and constraints.

pub mod db_type;
pub mod mapper;

pub use db_type::DbType;
pub use mapper::{Column, Complex, Constraint, Embedded, Join, LocalColumn, Mapper};
