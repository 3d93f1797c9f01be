//! Q objects for finder conditions.
//!
//! Fields are always real column names; aliases are translated before a
//! condition reaches this module.

use crate::schema::quote_ident;
use crate::value::{ToValue, Value};

/// A filter expression that can be combined with other expressions.
///
/// # Example
///
/// ```
/// use oxide_legacy_attrs::Q;
///
/// let (sql, params) = Q::eq("FirstName", "G.").and(Q::is_null("DOB")).build();
/// assert_eq!(sql, "(\"FirstName\" = ?) AND (\"DOB\" IS NULL)");
/// assert_eq!(params.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Q {
    expr: FilterExpr,
}

#[derive(Debug, Clone, PartialEq)]
enum FilterExpr {
    Eq { field: String, value: Value },
    IsNull { field: String },
    And(Box<FilterExpr>, Box<FilterExpr>),
}

impl Q {
    /// Creates an equality filter (field = value).
    pub fn eq<V: ToValue>(field: &str, value: V) -> Self {
        Self {
            expr: FilterExpr::Eq {
                field: field.to_string(),
                value: value.to_value(),
            },
        }
    }

    /// Creates an IS NULL filter.
    pub fn is_null(field: &str) -> Self {
        Self {
            expr: FilterExpr::IsNull {
                field: field.to_string(),
            },
        }
    }

    /// Matches `field` against `value`, using IS NULL for null values.
    pub fn matches(field: &str, value: Value) -> Self {
        if value.is_null() {
            Self::is_null(field)
        } else {
            Self::eq(field, value)
        }
    }

    /// ANDs together one `matches` filter per attribute.
    ///
    /// Returns `None` when there are no attributes.
    pub fn all_of<I>(attributes: I) -> Option<Self>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        attributes
            .into_iter()
            .map(|(field, value)| Self::matches(&field, value))
            .reduce(Self::and)
    }

    /// Combines this filter with another using AND.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self {
            expr: FilterExpr::And(Box::new(self.expr), Box::new(other.expr)),
        }
    }

    /// Builds the SQL WHERE clause and parameters.
    pub fn build(&self) -> (String, Vec<Value>) {
        build_filter_expr(&self.expr)
    }
}

fn build_filter_expr(expr: &FilterExpr) -> (String, Vec<Value>) {
    match expr {
        FilterExpr::Eq { field, value } => {
            (format!("{} = ?", quote_ident(field)), vec![value.clone()])
        }
        FilterExpr::IsNull { field } => (format!("{} IS NULL", quote_ident(field)), vec![]),
        FilterExpr::And(left, right) => {
            let (left_sql, mut left_params) = build_filter_expr(left);
            let (right_sql, right_params) = build_filter_expr(right);
            left_params.extend(right_params);
            (format!("({left_sql}) AND ({right_sql})"), left_params)
        }
    }
}
