//! Built-in name transforms.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static ACRONYM_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("valid acronym boundary regex")
});

static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("valid word boundary regex"));

/// A named case-conversion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inflection {
    /// `FirstName` -> `first_name`, `HTTPServer` -> `http_server`.
    #[default]
    Underscore,
    /// `FirstName` -> `firstname`.
    Downcase,
    /// `first_name` -> `FIRST_NAME`.
    Upcase,
    /// `first_name` -> `FirstName`.
    Camelize,
    /// `first_name` -> `firstName`.
    LowerCamelize,
}

impl Inflection {
    /// Applies the rule to a column name.
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Underscore => underscore(name),
            Self::Downcase => name.to_lowercase(),
            Self::Upcase => name.to_uppercase(),
            Self::Camelize => camelize(name, true),
            Self::LowerCamelize => camelize(name, false),
        }
    }
}

fn underscore(name: &str) -> String {
    let name = ACRONYM_BOUNDARY.replace_all(name, "${1}_${2}");
    let name = WORD_BOUNDARY.replace_all(&name, "${1}_${2}");
    name.replace('-', "_").to_lowercase()
}

fn camelize(name: &str, upper_first: bool) -> String {
    let mut result = String::with_capacity(name.len());
    let mut capitalize_next = upper_first;
    for c in name.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else if result.is_empty() && !upper_first {
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
