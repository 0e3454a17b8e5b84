//! Strictness checks evaluated during hydration. They only consult the cached
//! metadata and the supplied row.

use super::metadata::EntityMetadata;
use crate::error::{HydrationError, Result};
use crate::mapping::Column;
use crate::row::{ColumnValue, Row};

/// Strict entities must map every field still present on the instance
pub(crate) fn check_mapped_properties(metadata: &EntityMetadata) -> Result<()> {
    match metadata.unmapped_field() {
        Some(field) => Err(HydrationError::unmapped_property(metadata.entity(), field)),
        None => Ok(()),
    }
}

/// Strict entities require every mapped origin column to be present in the row,
/// null or not
pub(crate) fn check_required_columns(metadata: &EntityMetadata, row: &Row) -> Result<()> {
    if !metadata.capability().is_strict() {
        return Ok(());
    }

    let missing: Vec<String> = metadata
        .reverse_map()
        .keys()
        .filter(|origin| !row.contains_column(origin))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(HydrationError::missing_columns(metadata.entity(), missing))
    }
}

pub(crate) fn check_nullability(
    metadata: &EntityMetadata,
    column: &Column,
    value: &ColumnValue,
) -> Result<()> {
    if value.is_null() && !column.nullable {
        return Err(HydrationError::non_nullable_column(
            metadata.entity(),
            &column.name,
        ));
    }
    Ok(())
}
