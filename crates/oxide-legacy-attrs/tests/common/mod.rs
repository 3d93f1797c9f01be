#![allow(dead_code)]

use std::sync::Arc;

use oxide_legacy_attrs::{
    ColumnDef, ColumnType, ModelClass, Settings, TableSchema, Transform,
};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub fn people_schema() -> TableSchema {
    TableSchema::new("people")
        .column(ColumnDef::new("SSN", ColumnType::Integer).primary_key())
        .column(ColumnDef::new("FirstName", ColumnType::Text))
        .column(ColumnDef::new("LastName", ColumnType::Text))
        .column(ColumnDef::new("DOB", ColumnType::Text))
}

pub fn bills_schema() -> TableSchema {
    TableSchema::new("bills")
        .column(ColumnDef::new("id", ColumnType::Integer).primary_key())
        .column(ColumnDef::new("bill_from", ColumnType::Text))
        .column(ColumnDef::new("bill_is_late", ColumnType::Boolean).default_value(false))
        .column(ColumnDef::new("bill_amount_due", ColumnType::Float))
        .column(ColumnDef::new("person_id", ColumnType::Integer))
}

pub fn currencies_schema() -> TableSchema {
    TableSchema::new("currencies")
        .column(ColumnDef::new("id", ColumnType::Integer).primary_key())
        .column(ColumnDef::new("SYMBOL", ColumnType::Text))
        .column(ColumnDef::new("NAME", ColumnType::Text))
}

/// `Person`: underscore default, `SSN` and `DOB` skipped.
pub fn person() -> Arc<ModelClass> {
    let class = ModelClass::new("Person", people_schema())
        .transform_legacy_attribute_methods_with(
            Transform::new().skip(["SSN", "DOB"]),
            &Settings::new(),
        )
        .expect("Person configuration");
    Arc::new(class)
}

/// `Bill`: closure stripping the `bill_` prefix.
pub fn bill() -> Arc<ModelClass> {
    let class = ModelClass::new("Bill", bills_schema())
        .transform_legacy_attribute_methods_with(
            Transform::new().block(|col: &str| col.strip_prefix("bill_").unwrap_or(col).to_string()),
            &Settings::new(),
        )
        .expect("Bill configuration");
    Arc::new(class)
}

/// `Currency`: downcase transformer, `SYMBOL` skipped.
pub fn currency() -> Arc<ModelClass> {
    let class = ModelClass::new("Currency", currencies_schema())
        .transform_legacy_attribute_methods_with(
            Transform::new()
                .using(oxide_legacy_attrs::Transformer::from_fn(|col: &str| col.to_lowercase()))
                .skip(["SYMBOL"]),
            &Settings::new(),
        )
        .expect("Currency configuration");
    Arc::new(class)
}

pub async fn create_test_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create in-memory SQLite pool")
}

/// Creates the tables and loads the fixture rows.
pub async fn create_fixtures(pool: &SqlitePool) {
    for schema in [people_schema(), bills_schema(), currencies_schema()] {
        sqlx::query(&schema.create_table_sql())
            .execute(pool)
            .await
            .expect("create table");
    }

    sqlx::query(
        "INSERT INTO people (SSN, FirstName, LastName, DOB) VALUES \
         (123123, 'G.', 'Code', '1970-1-1'), \
         (456456, 'G.', 'Mercer', '1980-2-2')",
    )
    .execute(pool)
    .await
    .expect("insert people");

    sqlx::query(
        "INSERT INTO bills (id, bill_from, bill_is_late, bill_amount_due, person_id) VALUES \
         (1, 'Comcast', 0, 99.5, 123123), \
         (2, 'Adelitas', 1, 12.25, 123123), \
         (3, 'Water Board', 1, 40.0, 456456)",
    )
    .execute(pool)
    .await
    .expect("insert bills");
}
