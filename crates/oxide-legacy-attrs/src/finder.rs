//! Dynamic finder method names.
//!
//! `find_by_first_name_and_SSN` names a lookup on two attributes. Parsing
//! only splits the name; whether the attributes exist is decided by
//! [`ModelClass::all_attributes_exists`](crate::ModelClass::all_attributes_exists).

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LegacyError, Result};

static FINDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^find_(all_by|last_by|by|or_initialize_by|or_create_by)_([_a-zA-Z]\w*)$")
        .expect("valid finder regex")
});

/// What a dynamic finder returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderKind {
    /// `find_by_*`: the first match.
    First,
    /// `find_last_by_*`: the last match.
    Last,
    /// `find_all_by_*`: every match.
    All,
    /// `find_or_initialize_by_*`: the first match or a new unsaved record.
    OrInitialize,
    /// `find_or_create_by_*`: the first match or a new saved record.
    OrCreate,
}

/// A parsed dynamic finder method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicFinder {
    /// The finder flavour.
    pub kind: FinderKind,
    /// Attribute names in the order they appear in the method name.
    pub attribute_names: Vec<String>,
}

impl DynamicFinder {
    /// Parses a method name such as `find_all_by_first_name_and_last_name`.
    pub fn parse(method: &str) -> Result<Self> {
        let captures = FINDER
            .captures(method)
            .ok_or_else(|| LegacyError::InvalidFinder(method.to_string()))?;

        let kind = match &captures[1] {
            "all_by" => FinderKind::All,
            "last_by" => FinderKind::Last,
            "or_initialize_by" => FinderKind::OrInitialize,
            "or_create_by" => FinderKind::OrCreate,
            _ => FinderKind::First,
        };
        let attribute_names = captures[2].split("_and_").map(str::to_string).collect();

        Ok(Self {
            kind,
            attribute_names,
        })
    }
}
