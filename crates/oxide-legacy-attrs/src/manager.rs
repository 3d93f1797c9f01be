//! Manager for database access.
//!
//! The Manager loads and stores [`Record`]s of one [`ModelClass`] in SQLite
//! and answers dynamic finders, translating aliases to real column names
//! before any SQL is generated.

use std::sync::Arc;

use indexmap::IndexMap;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool, TypeInfo, ValueRef};
use tracing::debug;

use crate::error::{LegacyError, Result};
use crate::finder::{DynamicFinder, FinderKind};
use crate::model::ModelClass;
use crate::query::Q;
use crate::record::Record;
use crate::schema::quote_ident;
use crate::value::{ToValue, Value};

/// Result of a dynamic finder.
#[derive(Debug, Clone)]
pub enum Found {
    /// Single-record finders.
    One(Option<Record>),
    /// `find_all_by_*`.
    Many(Vec<Record>),
}

impl Found {
    /// Returns the first record found.
    #[must_use]
    pub fn into_first(self) -> Option<Record> {
        match self {
            Self::One(record) => record,
            Self::Many(records) => records.into_iter().next(),
        }
    }

    /// Returns every record found.
    #[must_use]
    pub fn into_vec(self) -> Vec<Record> {
        match self {
            Self::One(record) => record.into_iter().collect(),
            Self::Many(records) => records,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Asc,
    Desc,
}

/// A Manager provides database access for one model class.
///
/// # Example
///
/// ```ignore
/// let people = Manager::new(&person);
/// let found = people
///     .dynamic_find(&pool, "find_by_first_name_and_SSN", &["G.".to_value(), 123_123_i64.to_value()])
///     .await?
///     .into_first();
/// ```
#[derive(Debug, Clone)]
pub struct Manager {
    class: Arc<ModelClass>,
}

impl Manager {
    /// Creates a new Manager.
    #[must_use]
    pub fn new(class: &Arc<ModelClass>) -> Self {
        Self {
            class: Arc::clone(class),
        }
    }

    /// Returns the managed model class.
    #[must_use]
    pub fn class(&self) -> &Arc<ModelClass> {
        &self.class
    }

    /// Returns every record, ordered by primary key.
    pub async fn all(&self, pool: &SqlitePool) -> Result<Vec<Record>> {
        self.select(pool, None, Order::Asc, None).await
    }

    /// Returns the records matching `q`, ordered by primary key.
    pub async fn filter(&self, pool: &SqlitePool, q: Q) -> Result<Vec<Record>> {
        self.select(pool, Some(q), Order::Asc, None).await
    }

    /// Runs a dynamic finder such as `find_by_first_name_and_SSN`.
    ///
    /// Attribute names may be aliases or real column names; arguments pair
    /// with them by position.
    pub async fn dynamic_find(
        &self,
        pool: &SqlitePool,
        method: &str,
        arguments: &[Value],
    ) -> Result<Found> {
        let finder = DynamicFinder::parse(method)?;
        if !self.class.all_attributes_exists(&finder.attribute_names) {
            return Err(LegacyError::UnknownMethod {
                model: self.class.name().to_string(),
                method: method.to_string(),
            });
        }

        let conditions = self
            .class
            .construct_attributes_from_arguments(&finder.attribute_names, arguments);
        // Aggregates pass the existence check but a scalar argument cannot be
        // split across their columns.
        if let Some(name) = conditions
            .keys()
            .find(|name| !self.class.schema().has_column(name))
        {
            debug!(model = %self.class.name(), attribute = %name, "Finder condition is not a column");
            return Err(LegacyError::UnknownMethod {
                model: self.class.name().to_string(),
                method: method.to_string(),
            });
        }
        debug!(
            model = %self.class.name(),
            method = %method,
            columns = ?conditions.keys().collect::<Vec<_>>(),
            "Running dynamic finder"
        );
        let q = Q::all_of(conditions.clone());

        match finder.kind {
            FinderKind::All => Ok(Found::Many(self.select(pool, q, Order::Asc, None).await?)),
            FinderKind::First => Ok(Found::One(self.first(pool, q, Order::Asc).await?)),
            FinderKind::Last => Ok(Found::One(self.first(pool, q, Order::Desc).await?)),
            FinderKind::OrInitialize | FinderKind::OrCreate => {
                if let Some(record) = self.first(pool, q, Order::Asc).await? {
                    return Ok(Found::One(Some(record)));
                }
                let mut record = Record::new(&self.class);
                for (name, value) in conditions {
                    record.write_attribute(&name, value)?;
                }
                if finder.kind == FinderKind::OrCreate {
                    self.insert(pool, &mut record).await?;
                }
                Ok(Found::One(Some(record)))
            }
        }
    }

    /// Creates and saves a record from attributes (aliases allowed).
    pub async fn create<I, K, V>(&self, pool: &SqlitePool, attributes: I) -> Result<Record>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToValue,
    {
        let mut record = Record::with_attributes(&self.class, attributes)?;
        self.insert(pool, &mut record).await?;
        Ok(record)
    }

    /// Inserts a record. A null primary key is assigned by SQLite.
    pub async fn insert(&self, pool: &SqlitePool, record: &mut Record) -> Result<()> {
        let class = Arc::clone(record.class());
        let schema = class.schema();
        let pk = schema.primary_key().map(|c| c.name.as_str());

        let columns: Vec<(String, Value)> = record
            .attributes_without_transform()
            .into_iter()
            .filter(|(name, value)| !(Some(name.as_str()) == pk && value.is_null()))
            .collect();

        let table = quote_ident(schema.table());
        let sql = if columns.is_empty() {
            format!("INSERT INTO {table} DEFAULT VALUES")
        } else {
            let names: Vec<String> = columns.iter().map(|(name, _)| quote_ident(name)).collect();
            let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
            format!(
                "INSERT INTO {table} ({}) VALUES ({})",
                names.join(", "),
                placeholders.join(", ")
            )
        };
        debug!(sql = %sql, "Executing SQL");

        let mut query = sqlx::query(&sql);
        for (_, value) in columns {
            query = bind_value(query, value);
        }
        let result = query.execute(pool).await?;

        if let Some(pk) = pk {
            if record.read_attribute(pk)?.is_null() {
                record.write_attribute(pk, result.last_insert_rowid())?;
            }
        }
        record.mark_persisted();
        Ok(())
    }

    async fn first(&self, pool: &SqlitePool, q: Option<Q>, order: Order) -> Result<Option<Record>> {
        Ok(self
            .select(pool, q, order, Some(1))
            .await?
            .into_iter()
            .next())
    }

    async fn select(
        &self,
        pool: &SqlitePool,
        q: Option<Q>,
        order: Order,
        limit: Option<i64>,
    ) -> Result<Vec<Record>> {
        let schema = self.class.schema();
        let columns: Vec<String> = schema.column_names().map(quote_ident).collect();
        let order_column = schema
            .primary_key()
            .map_or_else(|| String::from("rowid"), |c| quote_ident(&c.name));
        let direction = match order {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        };

        let mut sql = format!(
            "SELECT {} FROM {}",
            columns.join(", "),
            quote_ident(schema.table())
        );
        let mut params = Vec::new();
        if let Some(q) = q {
            let (where_sql, where_params) = q.build();
            sql.push_str(&format!(" WHERE {where_sql}"));
            params = where_params;
        }
        sql.push_str(&format!(" ORDER BY {order_column} {direction}"));
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        debug!(sql = %sql, "Executing SQL");

        let mut query = sqlx::query(&sql);
        for value in params {
            query = bind_value(query, value);
        }
        let rows = query.fetch_all(pool).await?;

        rows.iter().map(|row| self.decode_row(row)).collect()
    }

    fn decode_row(&self, row: &SqliteRow) -> Result<Record> {
        let mut loaded = IndexMap::new();
        for name in self.class.schema().column_names() {
            loaded.insert(name.to_string(), decode_column(row, name)?);
        }
        Ok(Record::from_database(&self.class, loaded))
    }
}

/// Decodes a column by the storage class of the stored value.
fn decode_column(row: &SqliteRow, name: &str) -> Result<Value> {
    let raw = row.try_get_raw(name)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let value = match raw.type_info().name() {
        "INTEGER" | "BOOLEAN" => Value::Int(row.try_get(name)?),
        "REAL" => Value::Float(row.try_get(name)?),
        "BLOB" => Value::Blob(row.try_get(name)?),
        _ => Value::Text(row.try_get(name)?),
    };
    Ok(value)
}

/// Binds a Value parameter to a query.
fn bind_value<'q>(
    query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    value: Value,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(Option::<i64>::None),
        Value::Bool(b) => query.bind(b),
        Value::Int(i) => query.bind(i),
        Value::Float(f) => query.bind(f),
        Value::Text(s) => query.bind(s),
        Value::Blob(b) => query.bind(b),
    }
}
