//! Model instances.
//!
//! A [`Record`] stores one row of a model. Its `read_attribute` family works
//! on real column names only; the accessors on top of it (`get`, `set`,
//! `query`, `before_type_cast`, `read`, `write`, `attributes`) also accept
//! the aliases configured on the record's [`ModelClass`].

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{LegacyError, Result};
use crate::model::ModelClass;
use crate::value::{ToValue, Value};

/// A single instance of a model.
#[derive(Debug, Clone)]
pub struct Record {
    class: Arc<ModelClass>,
    values: IndexMap<String, Value>,
    raw: IndexMap<String, Value>,
    new_record: bool,
}

impl Record {
    /// Creates a new record with every column set to its default.
    #[must_use]
    pub fn new(class: &Arc<ModelClass>) -> Self {
        let values: IndexMap<String, Value> = class
            .schema()
            .columns()
            .iter()
            .map(|c| (c.name.clone(), c.default.clone()))
            .collect();
        Self {
            class: Arc::clone(class),
            raw: values.clone(),
            values,
            new_record: true,
        }
    }

    /// Creates a new record and mass-assigns the given attributes.
    ///
    /// Keys may be aliases or real column names.
    pub fn with_attributes<I, K, V>(class: &Arc<ModelClass>, attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToValue,
    {
        let mut record = Self::new(class);
        record.assign_attributes(attributes)?;
        Ok(record)
    }

    /// Builds a persisted record from values loaded from the database.
    pub(crate) fn from_database(class: &Arc<ModelClass>, loaded: IndexMap<String, Value>) -> Self {
        let mut record = Self::new(class);
        for (name, raw) in loaded {
            if let Some(column) = class.schema().get(&name) {
                record.values.insert(name.clone(), raw.cast(column.ty));
                record.raw.insert(name, raw);
            }
        }
        record.new_record = false;
        record
    }

    /// Returns the record's model class.
    #[must_use]
    pub fn class(&self) -> &Arc<ModelClass> {
        &self.class
    }

    /// Returns whether the record has not been saved yet.
    #[must_use]
    pub const fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.new_record = false;
    }

    fn unknown_attribute(&self, name: &str) -> LegacyError {
        LegacyError::UnknownAttribute {
            model: self.class.name().to_string(),
            attribute: name.to_string(),
        }
    }

    fn unknown_method(&self, method: &str) -> LegacyError {
        LegacyError::UnknownMethod {
            model: self.class.name().to_string(),
            method: method.to_string(),
        }
    }

    /// Reads the typecast value of a real column.
    pub fn read_attribute(&self, name: &str) -> Result<Value> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| self.unknown_attribute(name))
    }

    /// Writes a real column. The value is kept raw and cast to the column type.
    pub fn write_attribute(&mut self, name: &str, value: impl ToValue) -> Result<()> {
        let class = Arc::clone(&self.class);
        let column = class
            .schema()
            .get(name)
            .ok_or_else(|| self.unknown_attribute(name))?;

        let raw = value.to_value();
        self.values.insert(column.name.clone(), raw.cast(column.ty));
        self.raw.insert(column.name.clone(), raw);
        Ok(())
    }

    /// Reads the value of a real column as it was assigned or loaded.
    pub fn read_attribute_before_type_cast(&self, name: &str) -> Result<Value> {
        self.raw
            .get(name)
            .cloned()
            .ok_or_else(|| self.unknown_attribute(name))
    }

    /// Presence check of a real column.
    pub fn query_attribute(&self, name: &str) -> Result<bool> {
        self.values
            .get(name)
            .map(Value::is_present)
            .ok_or_else(|| self.unknown_attribute(name))
    }

    /// Returns all real columns and their values.
    #[must_use]
    pub fn attributes_without_transform(&self) -> IndexMap<String, Value> {
        self.values.clone()
    }

    fn accessor_target<'a>(&'a self, method: &'a str) -> Result<&'a str> {
        self.class
            .accessor_target(method)
            .ok_or_else(|| self.unknown_method(method))
    }

    /// The reader accessor: `person.get("first_name")`.
    pub fn get(&self, method: &str) -> Result<Value> {
        let real = self.accessor_target(method)?;
        self.read_attribute(real)
    }

    /// The writer accessor: `person.set("first_name", "J")`.
    pub fn set(&mut self, method: &str, value: impl ToValue) -> Result<()> {
        let class = Arc::clone(&self.class);
        let real = class
            .accessor_target(method)
            .ok_or_else(|| self.unknown_method(method))?;
        self.write_attribute(real, value)
    }

    /// The predicate accessor: `person.query("first_name")`.
    pub fn query(&self, method: &str) -> Result<bool> {
        let real = self.accessor_target(method)?;
        self.query_attribute(real)
    }

    /// The before-type-cast accessor.
    pub fn before_type_cast(&self, method: &str) -> Result<Value> {
        let real = self.accessor_target(method)?;
        self.read_attribute_before_type_cast(real)
    }

    /// Index-style read; aliases are translated first.
    pub fn read(&self, name: &str) -> Result<Value> {
        self.read_attribute(self.class.real_attribute_name(name))
    }

    /// Index-style write; aliases are translated first.
    pub fn write(&mut self, name: &str, value: impl ToValue) -> Result<()> {
        let class = Arc::clone(&self.class);
        self.write_attribute(class.real_attribute_name(name), value)
    }

    /// Returns all attributes under both their real and their alias names.
    #[must_use]
    pub fn attributes(&self) -> IndexMap<String, Value> {
        let mut attrs = self.attributes_without_transform();
        for (alias, real) in self.class.transformed_names().iter() {
            let value = attrs.get(real).cloned().unwrap_or(Value::Null);
            attrs.insert(alias.to_string(), value);
        }
        attrs
    }

    /// Mass assignment through the writer accessors.
    ///
    /// Stops at the first name the model does not answer to.
    pub fn assign_attributes<I, K, V>(&mut self, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToValue,
    {
        for (name, value) in attributes {
            self.set(name.as_ref(), value)?;
        }
        Ok(())
    }

    /// Serializes [`Record::attributes`] to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.attributes())?)
    }
}
