//! Attribute values and typecasting.
//!
//! Records keep two values per column: the raw value as it was assigned (or
//! loaded) and the value cast to the column's declared type.

use serde::Serialize;

use crate::schema::ColumnType;

/// A dynamically typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

const TRUE_VALUES: &[&str] = &["1", "t", "T", "true", "TRUE"];

impl Value {
    /// Returns whether this is `Value::Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Presence check backing the `attribute?` predicate.
    ///
    /// Null is absent, booleans answer for themselves, numbers are present
    /// when non-zero and text when it is not blank.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => !s.trim().is_empty(),
            Self::Blob(b) => !b.is_empty(),
        }
    }

    /// Casts the value to the given column type.
    #[must_use]
    pub fn cast(&self, ty: ColumnType) -> Self {
        if self.is_null() {
            return Self::Null;
        }
        match ty {
            ColumnType::Integer => self.cast_integer(),
            ColumnType::Float => self.cast_float(),
            ColumnType::Boolean => self.cast_boolean(),
            ColumnType::Text => self.cast_text(),
            ColumnType::Blob => match self {
                Self::Text(s) => Self::Blob(s.as_bytes().to_vec()),
                other => other.clone(),
            },
        }
    }

    fn cast_integer(&self) -> Self {
        match self {
            Self::Bool(b) => Self::Int(i64::from(*b)),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(f) => Self::Int(*f as i64),
            Self::Text(s) => s.trim().parse().map_or(Self::Null, Self::Int),
            other => other.clone(),
        }
    }

    fn cast_float(&self) -> Self {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(n) => Self::Float(*n as f64),
            Self::Bool(b) => Self::Float(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse().map_or(Self::Null, Self::Float),
            other => other.clone(),
        }
    }

    fn cast_boolean(&self) -> Self {
        match self {
            Self::Int(n) => Self::Bool(*n != 0),
            Self::Float(f) => Self::Bool(*f != 0.0),
            Self::Text(s) if s.trim().is_empty() => Self::Null,
            Self::Text(s) => Self::Bool(TRUE_VALUES.contains(&s.as_str())),
            other => other.clone(),
        }
    }

    fn cast_text(&self) -> Self {
        match self {
            Self::Bool(b) => Self::Text(b.to_string()),
            Self::Int(n) => Self::Text(n.to_string()),
            Self::Float(f) => Self::Text(f.to_string()),
            Self::Blob(b) => Self::Text(String::from_utf8_lossy(b).into_owned()),
            other => other.clone(),
        }
    }
}

/// Trait for types that can be converted to attribute values.
pub trait ToValue {
    /// Converts the value to a `Value`.
    fn to_value(self) -> Value;
}

impl ToValue for Value {
    fn to_value(self) -> Value {
        self
    }
}

impl ToValue for &Value {
    fn to_value(self) -> Value {
        self.clone()
    }
}

impl ToValue for bool {
    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

impl ToValue for i64 {
    fn to_value(self) -> Value {
        Value::Int(self)
    }
}

impl ToValue for i32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for u32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for f64 {
    fn to_value(self) -> Value {
        Value::Float(self)
    }
}

impl ToValue for String {
    fn to_value(self) -> Value {
        Value::Text(self)
    }
}

impl ToValue for &str {
    fn to_value(self) -> Value {
        Value::Text(String::from(self))
    }
}

impl ToValue for Vec<u8> {
    fn to_value(self) -> Value {
        Value::Blob(self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence() {
        assert!(!Value::Null.is_present());
        assert!(!Value::Text("  ".to_string()).is_present());
        assert!(Value::Text("J".to_string()).is_present());
        assert!(!Value::Int(0).is_present());
        assert!(Value::Int(7).is_present());
        assert!(!Value::Bool(false).is_present());
    }

    #[test]
    fn test_cast_boolean() {
        assert_eq!(Value::Int(1).cast(ColumnType::Boolean), Value::Bool(true));
        assert_eq!(Value::Int(0).cast(ColumnType::Boolean), Value::Bool(false));
        assert_eq!("t".to_value().cast(ColumnType::Boolean), Value::Bool(true));
        assert_eq!("no".to_value().cast(ColumnType::Boolean), Value::Bool(false));
        assert_eq!("".to_value().cast(ColumnType::Boolean), Value::Null);
    }

    #[test]
    fn test_cast_numeric() {
        assert_eq!(" 42 ".to_value().cast(ColumnType::Integer), Value::Int(42));
        assert_eq!("abc".to_value().cast(ColumnType::Integer), Value::Null);
        assert_eq!(Value::Int(2).cast(ColumnType::Float), Value::Float(2.0));
        assert_eq!("2.5".to_value().cast(ColumnType::Float), Value::Float(2.5));
    }

    #[test]
    fn test_cast_text() {
        assert_eq!(
            Value::Int(123_123).cast(ColumnType::Text),
            Value::Text("123123".to_string())
        );
        assert_eq!(Value::Null.cast(ColumnType::Text), Value::Null);
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&vec![
            Value::Null,
            Value::Bool(true),
            Value::Int(3),
            Value::Text("x".to_string()),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,true,3,"x"]"#);
    }
}
