use super::EntityDescriptor;
use crate::error::Result;
use crate::hydration::Hydrator;
use crate::row::Row;
use serde::de::DeserializeOwned;

/// Strongly typed domain object hydrated from rows.
///
/// Implementors name their static descriptor and derive `Deserialize`; fields
/// that may stay unset or vacant should be `Option` or carry `#[serde(default)]`.
///
/// ```rust
/// use entity_hydrator::mapping::{Column, DbType, Mapper};
/// use entity_hydrator::models::{Entity, EntityDescriptor, FieldDecl};
/// use entity_hydrator::row::{ColumnValue, Row};
/// use serde::Deserialize;
///
/// const TAG_FIELDS: &[FieldDecl] = &[FieldDecl::new("id"), FieldDecl::new("label")];
///
/// fn tag_mapper() -> Mapper {
///     Mapper::new()
///         .column("id", Column::new("tag_id", DbType::Int).not_null())
///         .column("label", Column::new("tag_label", DbType::Varchar))
/// }
///
/// static TAG: EntityDescriptor = EntityDescriptor::new("Tag")
///     .table("public", "tag")
///     .fields(TAG_FIELDS)
///     .mapper(tag_mapper);
///
/// #[derive(Debug, Deserialize)]
/// struct Tag {
///     id: i64,
///     label: Option<String>,
/// }
///
/// impl Entity for Tag {
///     fn descriptor() -> &'static EntityDescriptor {
///         &TAG
///     }
/// }
///
/// let row = Row::new().with("tag_id", 7).with("tag_label", ColumnValue::Null);
/// let tag = Tag::from_row(&row).unwrap();
/// assert_eq!(tag.id, 7);
/// assert_eq!(tag.label, None);
/// ```
pub trait Entity: DeserializeOwned {
    fn descriptor() -> &'static EntityDescriptor;

    /// Qualified `scheme.table` identity of the type
    fn table() -> String {
        Self::descriptor().table_name()
    }

    /// Hydrate with the process-wide hydrator and its default depth bounds
    fn from_row(row: &Row) -> Result<Self> {
        Hydrator::global().hydrate(Some(row))
    }

    /// Hydrate with explicit depth bounds
    fn from_row_with(row: Option<&Row>, max_depth: u32, current_depth: u32) -> Result<Self> {
        let hydrator = Hydrator::global();
        let context = hydrator
            .context()
            .with_max_depth(max_depth)
            .with_current_depth(current_depth);
        hydrator.hydrate_with(row, context)
    }

    /// Instance hydrated from no row at all
    fn empty() -> Result<Self> {
        Hydrator::global().hydrate(None)
    }

    /// Hydrate as a view, starting one level deeper
    fn view(row: &Row) -> Result<Self> {
        let hydrator = Hydrator::global();
        hydrator.hydrate_with(Some(row), hydrator.view_context())
    }
}

