//! Model classes and legacy attribute configuration.
//!
//! A [`ModelClass`] is the runtime description of a model type: its table
//! schema and, once configured, the alias map shared by all of its records.

use indexmap::IndexMap;
use tracing::info;

use crate::error::Result;
use crate::inflection::Inflection;
use crate::names::TransformedNames;
use crate::options::TransformOptions;
use crate::schema::TableSchema;
use crate::settings::Settings;
use crate::transformer::Transformer;
use crate::value::Value;

/// How a model's legacy columns should be aliased.
///
/// The transformer is picked in this order: a closure given with
/// [`Transform::block`], then a transformer given with [`Transform::using`]
/// or [`Transform::named`], then the settings' default.
///
/// # Example
///
/// ```
/// use oxide_legacy_attrs::{Inflection, Transform};
///
/// let person = Transform::new().skip(["SSN", "DOB"]);
/// let currency = Transform::named(Inflection::Downcase).skip(["SYMBOL"]);
/// let bill = Transform::new().block(|col| col.strip_prefix("bill_").unwrap_or(col).to_string());
/// # let _ = (person, currency, bill);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Transform {
    using: Option<Transformer>,
    block: Option<Transformer>,
    options: TransformOptions,
}

impl Transform {
    /// Uses the default transformer and no options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a built-in rule.
    #[must_use]
    pub fn named(rule: Inflection) -> Self {
        Self::new().using(rule)
    }

    /// Sets the positional transformer.
    #[must_use]
    pub fn using(mut self, transformer: impl Into<Transformer>) -> Self {
        self.using = Some(transformer.into());
        self
    }

    /// Sets a closure that takes precedence over any other transformer.
    #[must_use]
    pub fn block<F, S>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> S + Send + Sync + 'static,
        S: Into<String>,
    {
        self.block = Some(Transformer::from_fn(f));
        self
    }

    /// Skips the given columns.
    #[must_use]
    pub fn skip<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.skip(names);
        self
    }

    /// Replaces the options.
    #[must_use]
    pub fn options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    fn transformer(&self, settings: &Settings) -> Transformer {
        self.block
            .clone()
            .or_else(|| self.using.clone())
            .unwrap_or(Transformer::Named(settings.default_transformer))
    }
}

/// The four accessors every column (and every alias) answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// `name`
    Reader,
    /// `name=`
    Writer,
    /// `name?`
    Predicate,
    /// `name_before_type_cast`
    BeforeTypeCast,
}

impl Accessor {
    /// Splits a method name into its accessor kind and attribute name.
    #[must_use]
    pub fn parse(method: &str) -> (Self, &str) {
        if let Some(name) = method.strip_suffix('=') {
            (Self::Writer, name)
        } else if let Some(name) = method.strip_suffix('?') {
            (Self::Predicate, name)
        } else if let Some(name) = method.strip_suffix("_before_type_cast") {
            (Self::BeforeTypeCast, name)
        } else {
            (Self::Reader, method)
        }
    }
}

/// Runtime description of a model type.
#[derive(Debug, Clone)]
pub struct ModelClass {
    name: String,
    schema: TableSchema,
    names: TransformedNames,
}

impl ModelClass {
    /// Creates a model with real column names only.
    pub fn new(name: impl Into<String>, schema: TableSchema) -> Self {
        Self {
            name: name.into(),
            schema,
            names: TransformedNames::new(),
        }
    }

    /// Returns the model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the table schema.
    #[must_use]
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Returns the alias map.
    #[must_use]
    pub fn transformed_names(&self) -> &TransformedNames {
        &self.names
    }

    /// Aliases the model's columns using the installed [`Settings`].
    pub fn transform_legacy_attribute_methods(self, transform: Transform) -> Result<Self> {
        let settings = Settings::current();
        self.transform_legacy_attribute_methods_with(transform, &settings)
    }

    /// Aliases the model's columns using explicit settings.
    ///
    /// Calling this again rebuilds the alias map from scratch.
    pub fn transform_legacy_attribute_methods_with(
        mut self,
        transform: Transform,
        settings: &Settings,
    ) -> Result<Self> {
        let transformer = transform.transformer(settings);
        self.names = TransformedNames::build(
            &self.name,
            self.schema.column_names(),
            &transformer,
            &transform.options.skip,
        )?;

        info!(
            model = %self.name,
            aliases = self.names.len(),
            skipped = transform.options.skip.len(),
            "Transformed legacy attribute methods"
        );
        Ok(self)
    }

    /// Returns the real column name for an alias, or the name itself.
    #[must_use]
    pub fn real_attribute_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.names.real_attribute_name(name)
    }

    /// Returns the real column an accessor named `name` operates on.
    ///
    /// Both aliases and real column names have accessors.
    #[must_use]
    pub fn accessor_target<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        self.names
            .get(name)
            .or_else(|| self.schema.has_column(name).then_some(name))
    }

    /// Returns whether records of this model answer to `method`.
    ///
    /// Understands the `=`, `?` and `_before_type_cast` suffixes.
    #[must_use]
    pub fn respond_to(&self, method: &str) -> bool {
        let (_, name) = Accessor::parse(method);
        self.accessor_target(name).is_some()
    }

    /// Pairs finder attribute names with their arguments by position.
    ///
    /// Names are translated to real column names. A name without a matching
    /// argument gets `Value::Null`; surplus arguments are ignored.
    pub fn construct_attributes_from_arguments<S: AsRef<str>>(
        &self,
        names: &[S],
        arguments: &[Value],
    ) -> IndexMap<String, Value> {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let real = self.real_attribute_name(name.as_ref()).to_string();
                let value = arguments.get(idx).cloned().unwrap_or(Value::Null);
                (real, value)
            })
            .collect()
    }

    /// Returns whether every name is a real column or an alias.
    ///
    /// Aggregate names are expanded into their columns first.
    #[must_use]
    pub fn all_attributes_exists<S: AsRef<str>>(&self, names: &[S]) -> bool {
        let names: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
        self.schema
            .expand_attribute_names_for_aggregates(&names)
            .iter()
            .all(|name| self.schema.has_column(name) || self.names.contains_alias(name))
    }
}
