//! Domain types shared by the integration tests.
//!
//! Each fixture pairs a static descriptor with a typed struct. Row keys use the
//! origin column names declared by the mappers below.

use entity_hydrator::mapping::{Column, Complex, Constraint, DbType, Embedded, Join, Mapper};
use entity_hydrator::models::{Capability, Entity, EntityDescriptor, FieldDecl, Record};
use entity_hydrator::row::{ColumnValue, Scalar};
use entity_hydrator::{HydrationConfig, HydrationError, Hydrator, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fresh hydrator with its own metadata cache
pub fn hydrator() -> Hydrator {
    Hydrator::new(HydrationConfig::default())
}

pub fn hydrator_with_depth(max_depth: u32) -> Hydrator {
    Hydrator::new(HydrationConfig::default().with_max_depth(max_depth))
}

// Person: setter, default, JSON column and post-processing

fn active_by_default() -> Value {
    Value::Bool(true)
}

fn set_email(record: &mut Record, value: &ColumnValue) -> Result<()> {
    match value {
        ColumnValue::Null => Ok(()),
        ColumnValue::Scalar(Scalar::Text(email)) => {
            record.set("email", json!(email.to_lowercase()));
            Ok(())
        }
        other => Err(HydrationError::setter(
            "Person",
            "email",
            format!("expected text, got {other:?}"),
        )),
    }
}

fn derive_display_name(record: &mut Record) -> Result<()> {
    let display = record
        .value("name")
        .and_then(Value::as_str)
        .unwrap_or("anonymous")
        .to_string();
    record.set("display_name", json!(display));
    Ok(())
}

const PERSON_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("id"),
    FieldDecl::new("name"),
    FieldDecl::new("email").with_setter(set_email),
    FieldDecl::new("is_active").with_default(active_by_default),
    FieldDecl::new("settings"),
    FieldDecl::new("display_name"),
];

fn person_mapper() -> Mapper {
    Mapper::new()
        .column("id", Column::new("person_id", DbType::Int).not_null())
        .column("name", Column::new("person_name", DbType::Varchar))
        .column("email", Column::new("person_email", DbType::Varchar))
        .column("is_active", Column::new("person_active", DbType::Boolean))
        .column("settings", Column::new("person_settings", DbType::Jsonb))
}

pub static PERSON: EntityDescriptor = EntityDescriptor::new("Person")
    .table("public", "person")
    .fields(PERSON_FIELDS)
    .mapper(person_mapper)
    .post_processing(derive_display_name);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub settings: Option<Value>,
    pub display_name: Option<String>,
}

impl Entity for Person {
    fn descriptor() -> &'static EntityDescriptor {
        &PERSON
    }
}

// Orders: strict capabilities

const ORDER_FIELDS: &[FieldDecl] = &[FieldDecl::new("id"), FieldDecl::new("total")];
const BROKEN_ORDER_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("id"),
    FieldDecl::new("total"),
    FieldDecl::new("note"),
];

fn order_mapper() -> Mapper {
    Mapper::new()
        .column("id", Column::new("order_id", DbType::Int).not_null())
        .column("total", Column::new("order_total", DbType::Double).not_null())
}

pub static ORDER: EntityDescriptor = EntityDescriptor::new("Order")
    .table("sales", "orders")
    .capability(Capability::Full)
    .fields(ORDER_FIELDS)
    .mapper(order_mapper);

pub static BROKEN_ORDER: EntityDescriptor = EntityDescriptor::new("BrokenOrder")
    .table("sales", "orders")
    .capability(Capability::StrictlyFilled)
    .fields(BROKEN_ORDER_FIELDS)
    .mapper(order_mapper);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    pub id: i64,
    pub total: f64,
}

impl Entity for Order {
    fn descriptor() -> &'static EntityDescriptor {
        &ORDER
    }
}

// Author <-> Book: collection relation with a cycle back to the author

const AUTHOR_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("id"),
    FieldDecl::new("name"),
    FieldDecl::new("books"),
];
const BOOK_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("id"),
    FieldDecl::new("title"),
    FieldDecl::new("author"),
];

fn author_mapper() -> Mapper {
    Mapper::new()
        .column("id", Column::new("author_id", DbType::Int).not_null())
        .column("name", Column::new("author_name", DbType::Varchar))
        .constraint(
            "books",
            Constraint::new("author_books", Join::OneToMany, &BOOK),
        )
}

fn book_mapper() -> Mapper {
    Mapper::new()
        .column("id", Column::new("book_id", DbType::Int).not_null())
        .column("title", Column::new("book_title", DbType::Varchar))
        .constraint(
            "author",
            Constraint::new(
                Column::new("book_author_id", DbType::Int),
                Join::ManyToOne,
                &AUTHOR,
            ),
        )
}

pub static AUTHOR: EntityDescriptor = EntityDescriptor::new("Author")
    .table("library", "author")
    .fields(AUTHOR_FIELDS)
    .mapper(author_mapper);

pub static BOOK: EntityDescriptor = EntityDescriptor::new("Book")
    .table("library", "book")
    .fields(BOOK_FIELDS)
    .mapper(book_mapper);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: Option<String>,
    #[serde(default)]
    pub books: Vec<Book>,
}

impl Entity for Author {
    fn descriptor() -> &'static EntityDescriptor {
        &AUTHOR
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<Box<Author>>,
}

impl Entity for Book {
    fn descriptor() -> &'static EntityDescriptor {
        &BOOK
    }
}

// Invoice -> Customer -> Address: single-valued chain over one flat row

const INVOICE_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("id"),
    FieldDecl::new("amount"),
    FieldDecl::new("customer"),
];
const CUSTOMER_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("id"),
    FieldDecl::new("name"),
    FieldDecl::new("address"),
];
const ADDRESS_FIELDS: &[FieldDecl] = &[FieldDecl::new("id"), FieldDecl::new("city")];

fn invoice_mapper() -> Mapper {
    Mapper::new()
        .column("id", Column::new("invoice_id", DbType::Int).not_null())
        .column("amount", Column::new("invoice_amount", DbType::Double))
        .constraint(
            "customer",
            Constraint::new("invoice_customer_id", Join::OneToOne, &CUSTOMER),
        )
}

fn customer_mapper() -> Mapper {
    Mapper::new()
        .column("id", Column::new("customer_id", DbType::Int))
        .column("name", Column::new("customer_name", DbType::Varchar))
        .constraint(
            "address",
            Constraint::new("customer_address_id", Join::OneToOne, &ADDRESS),
        )
}

fn address_mapper() -> Mapper {
    Mapper::new()
        .column("id", Column::new("address_id", DbType::Int))
        .column("city", Column::new("address_city", DbType::Varchar))
}

pub static INVOICE: EntityDescriptor = EntityDescriptor::new("Invoice")
    .table("billing", "invoice")
    .fields(INVOICE_FIELDS)
    .mapper(invoice_mapper);

pub static CUSTOMER: EntityDescriptor = EntityDescriptor::new("Customer")
    .table("billing", "customer")
    .fields(CUSTOMER_FIELDS)
    .mapper(customer_mapper);

pub static ADDRESS: EntityDescriptor = EntityDescriptor::new("Address")
    .table("billing", "address")
    .fields(ADDRESS_FIELDS)
    .mapper(address_mapper);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub amount: Option<f64>,
    pub customer: Option<Customer>,
}

impl Entity for Invoice {
    fn descriptor() -> &'static EntityDescriptor {
        &INVOICE
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Customer {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Address {
    pub id: Option<i64>,
    pub city: Option<String>,
}

// Profile: embedded values and nested embedded entities

const PROFILE_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("id"),
    FieldDecl::new("tags"),
    FieldDecl::new("phones"),
    FieldDecl::new("avatar"),
    FieldDecl::new("nickname"),
];
const PHONE_FIELDS: &[FieldDecl] = &[FieldDecl::new("kind"), FieldDecl::new("number")];
const IMAGE_FIELDS: &[FieldDecl] = &[FieldDecl::new("url"), FieldDecl::new("width")];

fn profile_mapper() -> Mapper {
    Mapper::new()
        .column("id", Column::new("profile_id", DbType::Int).not_null())
        .embedded("tags", Embedded::new("profile_tags").json())
        .embedded("phones", Embedded::new("profile_phones").json().iterable(&PHONE))
        .embedded("avatar", Embedded::new("profile_avatar").json().entity(&IMAGE))
        .embedded("nickname", Embedded::new("profile_nickname"))
}

fn phone_mapper() -> Mapper {
    Mapper::new()
        .column("kind", Column::new("phone_kind", DbType::Varchar))
        .column("number", Column::new("phone_number", DbType::Varchar))
}

fn image_mapper() -> Mapper {
    Mapper::new()
        .column("url", Column::new("image_url", DbType::Text))
        .column("width", Column::new("image_width", DbType::Int))
}

pub static PROFILE: EntityDescriptor = EntityDescriptor::new("Profile")
    .table("public", "profile")
    .fields(PROFILE_FIELDS)
    .mapper(profile_mapper);

pub static PHONE: EntityDescriptor = EntityDescriptor::new("Phone")
    .table("public", "phone")
    .fields(PHONE_FIELDS)
    .mapper(phone_mapper);

pub static IMAGE: EntityDescriptor = EntityDescriptor::new("Image")
    .table("public", "image")
    .fields(IMAGE_FIELDS)
    .mapper(image_mapper);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub id: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub phones: Vec<Phone>,
    pub avatar: Option<Image>,
    pub nickname: Option<String>,
}

impl Entity for Profile {
    fn descriptor() -> &'static EntityDescriptor {
        &PROFILE
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Phone {
    pub kind: Option<String>,
    pub number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    pub url: Option<String>,
    pub width: Option<i64>,
}

// Shipment: complex composite over the same row

const SHIPMENT_FIELDS: &[FieldDecl] = &[FieldDecl::new("id"), FieldDecl::new("destination")];

fn shipment_mapper() -> Mapper {
    Mapper::new()
        .column("id", Column::new("shipment_id", DbType::Int).not_null())
        .complex("destination", Complex::new(&ADDRESS))
}

pub static SHIPMENT: EntityDescriptor = EntityDescriptor::new("Shipment")
    .table("logistics", "shipment")
    .fields(SHIPMENT_FIELDS)
    .mapper(shipment_mapper);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Shipment {
    pub id: i64,
    pub destination: Option<Address>,
}

impl Entity for Shipment {
    fn descriptor() -> &'static EntityDescriptor {
        &SHIPMENT
    }
}

// Users: declared-only hierarchy

const BASE_USER_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("id"),
    FieldDecl::new("login"),
    FieldDecl::new("password_hash"),
];
const PUBLIC_USER_FIELDS: &[FieldDecl] = &[FieldDecl::new("id"), FieldDecl::new("login")];
const STAFF_FIELDS: &[FieldDecl] = &[FieldDecl::new("department")];

fn user_mapper() -> Mapper {
    Mapper::new()
        .column("id", Column::new("user_id", DbType::Int).not_null())
        .column("login", Column::new("user_login", DbType::Varchar))
        .column("password_hash", Column::new("user_password_hash", DbType::Char))
}

fn staff_mapper() -> Mapper {
    user_mapper().column("department", Column::new("staff_department", DbType::Varchar))
}

pub static BASE_USER: EntityDescriptor = EntityDescriptor::new("BaseUser")
    .table("auth", "users")
    .fields(BASE_USER_FIELDS)
    .mapper(user_mapper);

pub static PUBLIC_USER: EntityDescriptor = EntityDescriptor::new("PublicUser")
    .table("auth", "users")
    .capability(Capability::DeclaredOnly)
    .extends(&BASE_USER)
    .fields(PUBLIC_USER_FIELDS)
    .mapper(user_mapper);

pub static STAFF: EntityDescriptor = EntityDescriptor::new("Staff")
    .table("auth", "users")
    .extends(&PUBLIC_USER)
    .fields(STAFF_FIELDS)
    .mapper(staff_mapper);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub login: Option<String>,
}

impl Entity for PublicUser {
    fn descriptor() -> &'static EntityDescriptor {
        &PUBLIC_USER
    }
}

// Synthetic, unmapped and instrumented types

const SUMMARY_FIELDS: &[FieldDecl] = &[FieldDecl::new("total")];

fn summary_mapper() -> Mapper {
    Mapper::new().column("total", Column::new("summary_total", DbType::BigInt))
}

pub static SYNTHETIC_SUMMARY: EntityDescriptor = EntityDescriptor::new("Summary")
    .capability(Capability::Synthetic)
    .fields(SUMMARY_FIELDS)
    .mapper(summary_mapper);

const UNMAPPED_FIELDS: &[FieldDecl] = &[FieldDecl::new("id")];

pub static UNMAPPED: EntityDescriptor = EntityDescriptor::new("Unmapped")
    .table("public", "unmapped")
    .fields(UNMAPPED_FIELDS);

/// Number of times the `Counted` mapper factory ran
pub static COUNTED_MAPPER_CALLS: AtomicUsize = AtomicUsize::new(0);

const COUNTED_FIELDS: &[FieldDecl] = &[FieldDecl::new("id")];

fn counted_mapper() -> Mapper {
    COUNTED_MAPPER_CALLS.fetch_add(1, Ordering::SeqCst);
    Mapper::new().column("id", Column::new("counted_id", DbType::Int))
}

pub static COUNTED: EntityDescriptor = EntityDescriptor::new("Counted")
    .table("public", "counted")
    .fields(COUNTED_FIELDS)
    .mapper(counted_mapper);
