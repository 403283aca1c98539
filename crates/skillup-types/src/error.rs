//! Errors raised while converting raw values into typed data

use thiserror::Error;

/// Errors produced when a raw value cannot be turned into one of our types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Role string outside the known set
    #[error("Invalid role parameter. Must be one of: ADMIN, INSTRUCTOR, STUDENT")]
    UnknownRole {
        /// The rejected value
        value: String,
    },

    /// Enumerated setting outside its allowed values
    #[error("Invalid value '{value}' for {field}")]
    UnknownVariant {
        /// Setting name
        field: &'static str,
        /// The rejected value
        value: String,
    },
}
