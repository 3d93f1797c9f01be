//! Error types for legacy attribute handling.

use thiserror::Error;

/// Errors raised while configuring or using legacy attribute aliases.
#[derive(Debug, Error)]
pub enum LegacyError {
    /// An option key other than `skip` was supplied.
    #[error("unknown option key: {0}")]
    InvalidOption(String),

    /// The option document could not be read.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A transformer returned nothing for a column.
    #[error("transformer returned nil for column '{column}' of {model}")]
    EmptyTransform {
        /// Model the column belongs to.
        model: String,
        /// The offending column.
        column: String,
    },

    /// No accessor with this name exists on the model.
    #[error("undefined method '{method}' for {model}")]
    UnknownMethod {
        /// Model the call was made on.
        model: String,
        /// The method name.
        method: String,
    },

    /// The model has no column with this name.
    #[error("unknown attribute '{attribute}' for {model}")]
    UnknownAttribute {
        /// Model the access was made on.
        model: String,
        /// The attribute name.
        attribute: String,
    },

    /// The method name does not follow the dynamic finder convention.
    #[error("not a dynamic finder: {0}")]
    InvalidFinder(String),

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for legacy attribute operations.
pub type Result<T> = std::result::Result<T, LegacyError>;
