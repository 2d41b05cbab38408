//! Error types for Stride

use thiserror::Error;

/// The main error type for Stride operations
#[derive(Debug, Error)]
pub enum StrideError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Scenario error: {0}")]
    ScenarioError(String),

    #[error("Physics error: {0}")]
    PhysicsError(String),
}

/// Result type alias for Stride operations
pub type Result<T> = std::result::Result<T, StrideError>;

impl StrideError {
    /// Build a `ValueOutOfRange` error for a named field
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        StrideError::ValueOutOfRange {
            field: field.into(),
            min,
            max,
            value,
        }
    }
}

impl From<toml::de::Error> for StrideError {
    fn from(err: toml::de::Error) -> Self {
        StrideError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for StrideError {
    fn from(err: toml::ser::Error) -> Self {
        StrideError::TomlSerError(err.to_string())
    }
}
