//! Process-wide defaults.
//!
//! [`Settings`] carries the transform used when a model is configured
//! without one. Models can receive settings explicitly through
//! [`ModelClass::transform_legacy_attribute_methods_with`]; the plain
//! [`ModelClass::transform_legacy_attribute_methods`] reads the installed
//! process-wide settings instead.
//!
//! Install settings once at startup, before any model is configured. Models
//! configured earlier keep the aliases they were built with.
//!
//! [`ModelClass::transform_legacy_attribute_methods_with`]: crate::ModelClass::transform_legacy_attribute_methods_with
//! [`ModelClass::transform_legacy_attribute_methods`]: crate::ModelClass::transform_legacy_attribute_methods

use std::sync::{PoisonError, RwLock};

use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::inflection::Inflection;

static CURRENT: RwLock<Settings> = RwLock::new(Settings::new());

/// Defaults applied when configuring models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Rule used when no transformer is given.
    pub default_transformer: Inflection,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Creates settings with the `underscore` default transform.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_transformer: Inflection::Underscore,
        }
    }

    /// Sets the default transform.
    #[must_use]
    pub const fn default_transformer(mut self, rule: Inflection) -> Self {
        self.default_transformer = rule;
        self
    }

    /// Parses settings from JSON, e.g. `{"default_transformer": "downcase"}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the installed process-wide settings.
    #[must_use]
    pub fn current() -> Self {
        *CURRENT.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Installs these settings process-wide.
    pub fn install(self) {
        info!(default_transformer = ?self.default_transformer, "Installing legacy attribute settings");
        *CURRENT.write().unwrap_or_else(PoisonError::into_inner) = self;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_underscore() {
        assert_eq!(Settings::default().default_transformer, Inflection::Underscore);
    }

    #[test]
    fn test_from_json() {
        let settings = Settings::from_json(r#"{"default_transformer": "downcase"}"#).unwrap();
        assert_eq!(settings.default_transformer, Inflection::Downcase);

        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::new());
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        assert!(Settings::from_json(r#"{"transformer": "downcase"}"#).is_err());
    }
}
