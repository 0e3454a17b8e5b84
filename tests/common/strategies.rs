use entity_hydrator::row::{ColumnValue, Row};
use proptest::prelude::*;

/// Strategy for generating person names, including absent ones
pub fn person_name_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Za-z][A-Za-z '-]{0,31}")
}

/// Strategy for generating email addresses with mixed case
pub fn email_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Za-z0-9]{1,12}@[A-Za-z]{1,8}\\.(com|org|NET)")
}

/// Strategy for generating complete `Person` rows
pub fn person_row_strategy() -> impl Strategy<Value = Row> {
    (
        any::<i32>(),
        person_name_strategy(),
        email_strategy(),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(id, name, email, active)| {
            Row::new()
                .with("person_id", id)
                .with("person_name", name)
                .with("person_email", email)
                .with("person_active", active)
        })
}

/// Strategy for generating the raw book elements of an encoded sequence
pub fn book_elements_strategy() -> impl Strategy<Value = Vec<serde_json::Value>> {
    prop::collection::vec(
        (1i64..10_000, prop::option::of("[A-Za-z ]{1,24}")),
        0..8,
    )
    .prop_map(|books| {
        books
            .into_iter()
            .map(|(id, title)| serde_json::json!({ "book_id": id, "book_title": title }))
            .collect()
    })
}

/// Strategy for generating nullable cell values of the `Varchar` type
pub fn nullable_text_strategy() -> impl Strategy<Value = ColumnValue> {
    prop::option::of("[a-z]{0,16}").prop_map(ColumnValue::from)
}
