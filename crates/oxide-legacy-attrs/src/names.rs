//! The transformed name map.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{LegacyError, Result};
use crate::options::SkipList;
use crate::transformer::Transformer;

/// Maps transformed names to the real column names they alias.
///
/// Built once when a model is configured and read-only afterwards. When two
/// columns transform to the same alias the later column wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformedNames {
    aliases: IndexMap<String, String>,
}

impl TransformedNames {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map for the given columns.
    ///
    /// Columns in `skip` get no alias. Fails on the first column for which
    /// the transformer produces nothing.
    pub fn build<'a, I>(
        model: &str,
        columns: I,
        transformer: &Transformer,
        skip: &SkipList,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names = Self::new();
        for column in columns {
            if skip.contains(column) {
                debug!(model = %model, column = %column, "Skipping legacy column");
                continue;
            }

            let alias = transformer
                .apply(column)
                .ok_or_else(|| LegacyError::EmptyTransform {
                    model: model.to_string(),
                    column: column.to_string(),
                })?;

            debug!(model = %model, column = %column, alias = %alias, "Aliasing legacy column");
            if let Some(previous) = names.aliases.insert(alias.clone(), column.to_string()) {
                warn!(
                    model = %model,
                    alias = %alias,
                    previous = %previous,
                    column = %column,
                    "Alias collision, later column wins"
                );
            }
        }
        Ok(names)
    }

    /// Returns the real column behind an alias.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Returns whether the name is a known alias.
    #[must_use]
    pub fn contains_alias(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// Translates an alias to its real name; other names pass through.
    #[must_use]
    pub fn real_attribute_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).unwrap_or(name)
    }

    /// Iterates `(alias, real name)` pairs in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns whether there are no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
