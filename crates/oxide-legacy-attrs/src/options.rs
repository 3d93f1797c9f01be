//! Options accepted when configuring legacy attributes.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value as Json;

use crate::error::{LegacyError, Result};

const VALID_KEYS: &[&str] = &["skip"];

/// Real column names excluded from aliasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipList {
    names: HashSet<String>,
}

impl SkipList {
    /// Creates an empty skip list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column name.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Returns whether the column is skipped.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns the number of skipped names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether nothing is skipped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SkipList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for SkipList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

/// A single name or a (possibly nested) list of names.
#[derive(Deserialize)]
#[serde(untagged)]
enum Names {
    One(String),
    Many(Vec<Names>),
}

impl Names {
    fn flatten_into(self, out: &mut SkipList) {
        match self {
            Self::One(name) => out.insert(name),
            Self::Many(names) => {
                for names in names {
                    names.flatten_into(out);
                }
            }
        }
    }
}

/// Options for `transform_legacy_attribute_methods`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Columns that keep only their real name.
    pub skip: SkipList,
}

impl TransformOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds columns to the skip list.
    #[must_use]
    pub fn skip<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip.extend(names);
        self
    }

    /// Reads options from a JSON object such as `{"skip": ["SSN", "DOB"]}`.
    ///
    /// `skip` may be a single name or a list. Any other key is rejected.
    pub fn from_json(options: Json) -> Result<Self> {
        let Json::Object(map) = options else {
            return Err(LegacyError::InvalidOptions(format!(
                "expected an object, got {options}"
            )));
        };

        if let Some(key) = map.keys().find(|k| !VALID_KEYS.contains(&k.as_str())) {
            return Err(LegacyError::InvalidOption(key.clone()));
        }

        let mut skip = SkipList::new();
        if let Some(value) = map.get("skip") {
            if !value.is_null() {
                let names = Names::deserialize(value)
                    .map_err(|e| LegacyError::InvalidOptions(format!("skip: {e}")))?;
                names.flatten_into(&mut skip);
            }
        }
        Ok(Self { skip })
    }
}
