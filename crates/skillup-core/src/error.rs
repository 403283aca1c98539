//! Error types for the `SkillUp` admin console

use std::{error::Error as StdError, fmt};

/// Main error type for configuration, storage and startup failures
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Serialization error (JSON or TOML)
    Serialization {
        /// Error message
        message: String,
    },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::Serialization { message } => write!(f, "Serialization error: {message}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

// From implementations for automatic conversions
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let app_error = Error::from(io_error);

        assert!(matches!(app_error, Error::Io(_)));
        assert!(format!("{}", app_error).contains("I/O error"));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_configuration_error() {
        let error = Error::Configuration {
            message: "Invalid base URL".to_string(),
        };

        assert_eq!(format!("{}", error), "Configuration error: Invalid base URL");
    }

    #[test]
    fn test_validation_error() {
        let error = Error::Validation {
            field: "general.siteName".to_string(),
            message: "Site name is required".to_string(),
        };

        assert_eq!(
            format!("{}", error),
            "Validation error: general.siteName - Site name is required"
        );
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let error = Error::from(parse.unwrap_err());
        assert!(matches!(error, Error::Serialization { .. }));
        assert!(error.to_string().starts_with("Serialization error:"));
    }
}
