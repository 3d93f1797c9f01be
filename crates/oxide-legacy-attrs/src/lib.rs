//! # oxide-legacy-attrs
//!
//! Transformed aliases for legacy column names.
//!
//! Legacy schemas often carry column names like `FirstName`, `SSN` or
//! `bill_from`. Configuring a [`ModelClass`] with
//! [`ModelClass::transform_legacy_attribute_methods`] builds an alias for
//! each column (`first_name`, `ssn`, `from`) so that both spellings work for:
//!
//! - the per-attribute accessors (`get`, `set`, `query`, `before_type_cast`)
//! - index-style access (`read`, `write`)
//! - mass assignment (`assign_attributes`, `Record::with_attributes`)
//! - the attribute hash (`attributes`, `to_json`)
//! - dynamic finders (`Manager::dynamic_find`)
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use oxide_legacy_attrs::{ColumnDef, ColumnType, ModelClass, Record, TableSchema, Transform, Value};
//!
//! let schema = TableSchema::new("people")
//!     .column(ColumnDef::new("SSN", ColumnType::Integer).primary_key())
//!     .column(ColumnDef::new("FirstName", ColumnType::Text))
//!     .column(ColumnDef::new("DOB", ColumnType::Text));
//!
//! let person = Arc::new(
//!     ModelClass::new("Person", schema)
//!         .transform_legacy_attribute_methods(Transform::new().skip(["SSN", "DOB"]))?,
//! );
//!
//! let mut record = Record::with_attributes(&person, [("first_name", "J")])?;
//! assert_eq!(record.get("FirstName")?, Value::Text("J".to_string()));
//! assert!(record.get("dob").is_err());
//!
//! record.set("DOB", "2000-1-1")?;
//! assert_eq!(record.attributes()["first_name"], Value::Text("J".to_string()));
//! # Ok::<(), oxide_legacy_attrs::LegacyError>(())
//! ```
//!
//! ## Choosing a transformer
//!
//! A closure passed with [`Transform::block`] wins over a transformer passed
//! with [`Transform::using`] or [`Transform::named`], which wins over the
//! process-wide default in [`Settings`] (`underscore` unless changed).
//!
//! Aliases that collide are not detected: the later column wins.

mod error;
pub mod finder;
mod inflection;
mod manager;
mod model;
mod names;
mod options;
pub mod query;
mod record;
pub mod schema;
mod settings;
mod transformer;
mod value;

pub use error::{LegacyError, Result};
pub use finder::{DynamicFinder, FinderKind};
pub use inflection::Inflection;
pub use manager::{Found, Manager};
pub use model::{Accessor, ModelClass, Transform};
pub use names::TransformedNames;
pub use options::{SkipList, TransformOptions};
pub use query::Q;
pub use record::Record;
pub use schema::{Aggregation, ColumnDef, ColumnType, TableSchema};
pub use settings::Settings;
pub use transformer::Transformer;
pub use value::{ToValue, Value};
