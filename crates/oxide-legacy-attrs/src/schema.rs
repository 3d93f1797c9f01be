//! Table schemas for dynamic models.
//!
//! A [`TableSchema`] lists a model's real columns in the order the database
//! reports them. Schemas are either declared by hand or read from a live
//! SQLite database with [`TableSchema::introspect`].

use sqlx::sqlite::SqlitePool;
use tracing::debug;

use crate::error::Result;
use crate::value::{ToValue, Value};

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Whole numbers.
    Integer,
    /// Floating point and decimal numbers.
    Float,
    /// Strings.
    Text,
    /// Booleans, stored as integers by SQLite.
    Boolean,
    /// Raw bytes.
    Blob,
}

impl ColumnType {
    /// Maps a declared SQLite column type to a column type.
    ///
    /// Follows SQLite's type affinity rules, with `BOOL` recognized first.
    #[must_use]
    pub fn from_declared(declared: &str) -> Self {
        let declared = declared.to_ascii_uppercase();
        if declared.contains("BOOL") {
            Self::Boolean
        } else if declared.contains("INT") {
            Self::Integer
        } else if declared.contains("CHAR") || declared.contains("CLOB") || declared.contains("TEXT")
        {
            Self::Text
        } else if declared.is_empty() || declared.contains("BLOB") {
            Self::Blob
        } else {
            Self::Float
        }
    }

    /// Returns the SQL type used when creating the column.
    #[must_use]
    pub const fn sql_type(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Float => "REAL",
            Self::Text => "TEXT",
            Self::Boolean => "BOOLEAN",
            Self::Blob => "BLOB",
        }
    }
}

/// A real column of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name as stored in the database.
    pub name: String,
    /// Declared type.
    pub ty: ColumnType,
    /// Default value for new records.
    pub default: Value,
    /// Whether this is the primary key.
    pub primary_key: bool,
}

impl ColumnDef {
    /// Creates a new column definition.
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: Value::Null,
            primary_key: false,
        }
    }

    /// Marks the column as primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Sets the default value, cast to the column type.
    #[must_use]
    pub fn default_value(mut self, value: impl ToValue) -> Self {
        self.default = value.to_value().cast(self.ty);
        self
    }
}

/// A value object composed from several columns.
///
/// Finders may name the aggregate instead of its columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// Name of the aggregate attribute.
    pub name: String,
    /// Real columns the aggregate maps onto.
    pub mapping: Vec<String>,
}

/// Schema of a model's table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    table: String,
    columns: Vec<ColumnDef>,
    aggregations: Vec<Aggregation>,
}

impl TableSchema {
    /// Creates an empty schema for a table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            aggregations: Vec::new(),
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds an aggregation over existing columns.
    #[must_use]
    pub fn aggregate<I, S>(mut self, name: impl Into<String>, mapping: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aggregations.push(Aggregation {
            name: name.into(),
            mapping: mapping.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Returns the table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the columns in schema order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Returns the column names in schema order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Looks up a column by its real name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns whether a real column with this name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the primary key column, if any.
    #[must_use]
    pub fn primary_key(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.primary_key)
    }

    /// Replaces aggregate names with the columns they map onto.
    ///
    /// Names that are not aggregates are returned unchanged.
    #[must_use]
    pub fn expand_attribute_names_for_aggregates(&self, names: &[String]) -> Vec<String> {
        names
            .iter()
            .flat_map(|name| {
                self.aggregations
                    .iter()
                    .find(|agg| &agg.name == name)
                    .map_or_else(|| vec![name.clone()], |agg| agg.mapping.clone())
            })
            .collect()
    }

    /// Renders a `CREATE TABLE` statement for this schema.
    #[must_use]
    pub fn create_table_sql(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let mut def = format!("{} {}", quote_ident(&c.name), c.ty.sql_type());
                if c.primary_key {
                    def.push_str(" PRIMARY KEY");
                }
                if !c.default.is_null() {
                    def.push_str(" DEFAULT ");
                    def.push_str(&default_literal(&c.default));
                }
                def
            })
            .collect();
        format!(
            "CREATE TABLE {} ({})",
            quote_ident(&self.table),
            columns.join(", ")
        )
    }

    /// Reads the schema of an existing SQLite table.
    pub async fn introspect(pool: &SqlitePool, table: &str) -> Result<Self> {
        let sql = format!("PRAGMA table_info({})", quote_ident(table));
        let rows: Vec<(i64, String, String, i64, Option<String>, i64)> =
            sqlx::query_as(&sql).fetch_all(pool).await?;

        let mut schema = Self::new(table);
        for (_cid, name, declared, _not_null, default, pk) in rows {
            let ty = ColumnType::from_declared(&declared);
            let mut column = ColumnDef::new(name, ty);
            if let Some(literal) = default {
                column = column.default_value(parse_default(&literal));
            }
            if pk > 0 {
                column = column.primary_key();
            }
            schema = schema.column(column);
        }

        debug!(table = %table, columns = schema.columns.len(), "Introspected table");
        Ok(schema)
    }
}

/// Double-quotes an identifier.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn default_literal(value: &Value) -> String {
    match value {
        Value::Null => String::from("NULL"),
        Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
        Value::Blob(b) => {
            let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
            format!("X'{hex}'")
        }
    }
}

/// Parses the SQL literal SQLite reports as a column default.
fn parse_default(literal: &str) -> Value {
    let literal = literal.trim();
    if literal.eq_ignore_ascii_case("NULL") {
        return Value::Null;
    }
    if let Some(inner) = literal
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
    {
        return Value::Text(inner.replace("''", "'"));
    }
    if let Ok(n) = literal.parse::<i64>() {
        return Value::Int(n);
    }
    if let Ok(f) = literal.parse::<f64>() {
        return Value::Float(f);
    }
    match literal.to_ascii_uppercase().as_str() {
        "TRUE" => Value::Bool(true),
        "FALSE" => Value::Bool(false),
        _ => Value::Text(literal.to_string()),
    }
}
