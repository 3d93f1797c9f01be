//! Column name transformers.

use std::fmt;
use std::sync::Arc;

use crate::inflection::Inflection;

type TransformFn = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Maps a real column name to its alias.
///
/// A transformer is either one of the built-in [`Inflection`] rules or a
/// caller-supplied closure. Closures may return `None` (or an empty string)
/// to signal a failure; configuration then stops with an error naming the
/// column.
#[derive(Clone)]
pub enum Transformer {
    /// A built-in rule.
    Named(Inflection),
    /// A caller-supplied function.
    Custom(Arc<TransformFn>),
}

impl Transformer {
    /// Wraps a closure returning the alias for a column.
    pub fn from_fn<F, S>(f: F) -> Self
    where
        F: Fn(&str) -> S + Send + Sync + 'static,
        S: Into<String>,
    {
        Self::Custom(Arc::new(move |name: &str| Some(f(name).into())))
    }

    /// Wraps a closure that may fail to produce an alias.
    pub fn from_fallible_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Applies the transformer. Empty results are reported as `None`.
    #[must_use]
    pub fn apply(&self, name: &str) -> Option<String> {
        let transformed = match self {
            Self::Named(rule) => Some(rule.apply(name)),
            Self::Custom(f) => f(name),
        };
        transformed.filter(|s| !s.is_empty())
    }
}

impl From<Inflection> for Transformer {
    fn from(rule: Inflection) -> Self {
        Self::Named(rule)
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(rule) => f.debug_tuple("Named").field(rule).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
