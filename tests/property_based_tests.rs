mod common;

use common::*;
use entity_hydrator::row::{ColumnValue, Row};
use entity_hydrator::HydrationError;
use proptest::prelude::*;

proptest! {
    /// Property: hydrating the same row twice yields equal instances
    #[test]
    fn hydration_is_deterministic(row in person_row_strategy()) {
        let hydrator = hydrator();
        let first = hydrator.hydrate_record(&PERSON, Some(&row), hydrator.context()).unwrap();
        let second = hydrator.hydrate_record(&PERSON, Some(&row), hydrator.context()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: emails always pass through the lowercasing setter
    #[test]
    fn emails_are_normalized(row in person_row_strategy()) {
        let person: Person = hydrator().hydrate(Some(&row)).unwrap();
        if let Some(email) = person.email {
            prop_assert_eq!(email.clone(), email.to_lowercase());
        }
    }

    /// Property: a non-null value in a non-nullable column lands unchanged
    #[test]
    fn non_nullable_column_keeps_supplied_value(id in any::<i64>()) {
        let row = Row::new().with("person_id", id);
        let person: Person = hydrator().hydrate(Some(&row)).unwrap();
        prop_assert_eq!(person.id, id);
    }

    /// Property: nullable columns accept null and non-null values alike
    #[test]
    fn nullable_column_accepts_any_value(value in nullable_text_strategy()) {
        let row = Row::new().with("person_id", 1).with("person_name", value.clone());
        let person: Person = hydrator().hydrate(Some(&row)).unwrap();
        match value {
            ColumnValue::Scalar(_) => prop_assert!(person.name.is_some()),
            _ => prop_assert!(person.name.is_none()),
        }
    }

    /// Property: one-to-many sequences keep their length and order
    #[test]
    fn collections_preserve_order(books in book_elements_strategy()) {
        let row = Row::new()
            .with("author_id", 1)
            .with("author_books", serde_json::Value::Array(books.clone()));
        let author: Author = hydrator().hydrate(Some(&row)).unwrap();

        prop_assert_eq!(author.books.len(), books.len());
        for (book, raw) in author.books.iter().zip(&books) {
            prop_assert_eq!(Some(book.id), raw["book_id"].as_i64());
        }
    }

    /// Property: a strict row missing any mapped column is rejected by name
    #[test]
    fn strict_rows_missing_a_column_fail(keep_id in any::<bool>()) {
        let row = if keep_id {
            Row::new().with("order_id", 1)
        } else {
            Row::new().with("order_total", 1.0)
        };
        let missing = if keep_id { "order_total" } else { "order_id" };

        let err = hydrator().hydrate::<Order>(Some(&row)).unwrap_err();
        prop_assert_eq!(err, HydrationError::missing_columns("Order", vec![missing.to_string()]));
    }
}
