//! # Hydration Error Types
//!
//! Structured error handling for row hydration using thiserror. Every variant
//! carries the concrete entity name and, where one exists, the offending field
//! or column so a failure can be traced back to its declaration without a
//! debugger.

use thiserror::Error;

/// Errors raised while resolving metadata or hydrating a row
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydrationError {
    #[error("Entity {entity} does not have a mapping declaration")]
    MappingNotFound { entity: String },

    #[error("Strict entity {entity} has unmapped property '{field}'")]
    UnmappedProperty { entity: String, field: String },

    #[error("Missing columns for strictly filled entity '{entity}': {}", .columns.join(", "))]
    MissingColumns {
        entity: String,
        columns: Vec<String>,
    },

    #[error("Column {column} of {entity} does not accept null values according to its mapping")]
    NonNullableColumn { entity: String, column: String },

    #[error("Property '{field}' of {entity} is a single-valued relation but received an array")]
    UnexpectedArray { entity: String, field: String },

    #[error("Property '{field}' of '{entity}' does not exist or was unset during construction")]
    UndeclaredProperty { entity: String, field: String },

    #[error("Column {column} of {entity} holds malformed JSON: {message}")]
    MalformedJson {
        entity: String,
        column: String,
        message: String,
    },

    #[error("Property '{field}' of {entity} expected {expected}")]
    MalformedValue {
        entity: String,
        field: String,
        expected: String,
    },

    #[error("Hydrated record of {entity} could not be converted: {message}")]
    Conversion { entity: String, message: String },

    #[error("Setter for property '{field}' of {entity} failed: {message}")]
    Setter {
        entity: String,
        field: String,
        message: String,
    },

    #[error("Column {column} has unsupported database type {type_name}")]
    UnsupportedColumnType { column: String, type_name: String },

    #[error("Column {column} could not be decoded: {message}")]
    RowDecode { column: String, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl HydrationError {
    pub fn mapping_not_found(entity: impl Into<String>) -> Self {
        Self::MappingNotFound {
            entity: entity.into(),
        }
    }

    pub fn unmapped_property(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnmappedProperty {
            entity: entity.into(),
            field: field.into(),
        }
    }

    /// Create a missing columns error; column names are reported in the order given
    pub fn missing_columns(entity: impl Into<String>, columns: Vec<String>) -> Self {
        Self::MissingColumns {
            entity: entity.into(),
            columns,
        }
    }

    pub fn non_nullable_column(entity: impl Into<String>, column: impl Into<String>) -> Self {
        Self::NonNullableColumn {
            entity: entity.into(),
            column: column.into(),
        }
    }

    pub fn unexpected_array(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnexpectedArray {
            entity: entity.into(),
            field: field.into(),
        }
    }

    pub fn undeclared_property(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UndeclaredProperty {
            entity: entity.into(),
            field: field.into(),
        }
    }

    pub fn malformed_json(
        entity: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedJson {
            entity: entity.into(),
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn malformed_value(
        entity: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::MalformedValue {
            entity: entity.into(),
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub fn conversion(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conversion {
            entity: entity.into(),
            message: message.into(),
        }
    }

    pub fn setter(
        entity: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Setter {
            entity: entity.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_column_type(column: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnsupportedColumnType {
            column: column.into(),
            type_name: type_name.into(),
        }
    }

    pub fn row_decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RowDecode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Name of the entity the error was raised for, when it is tied to one
    pub fn entity(&self) -> Option<&str> {
        match self {
            Self::MappingNotFound { entity }
            | Self::UnmappedProperty { entity, .. }
            | Self::MissingColumns { entity, .. }
            | Self::NonNullableColumn { entity, .. }
            | Self::UnexpectedArray { entity, .. }
            | Self::UndeclaredProperty { entity, .. }
            | Self::MalformedJson { entity, .. }
            | Self::MalformedValue { entity, .. }
            | Self::Conversion { entity, .. }
            | Self::Setter { entity, .. } => Some(entity),
            Self::UnsupportedColumnType { .. } | Self::RowDecode { .. } | Self::Configuration(_) => {
                None
            }
        }
    }
}

impl From<config::ConfigError> for HydrationError {
    fn from(err: config::ConfigError) -> Self {
        HydrationError::Configuration(err.to_string())
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for HydrationError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { index, source } => {
                HydrationError::row_decode(index, source.to_string())
            }
            sqlx::Error::ColumnNotFound(column) => {
                HydrationError::row_decode(column, "column not found")
            }
            other => HydrationError::row_decode("<row>", other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, HydrationError>;
