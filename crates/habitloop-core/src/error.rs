//! Core error types for habitloop-core.
//!
//! The progress engine itself never fails; everything that can go wrong
//! lives at the edges (storage, configuration, input validation and the
//! motivation generator). Those failures are collected here with thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitloop-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Motivation generator errors
    #[error("Motivation error: {0}")]
    Motivation(#[from] MotivationError),

    /// A habit or identity referenced by id does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub fn habit_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind: "Habit",
            id: id.into(),
        }
    }
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Insert collided with an existing record
    #[error("Record already exists: {0}")]
    Duplicate(String),

    /// Stored document could not be decoded
    #[error("Corrupt document for '{id}': {message}")]
    CorruptDocument { id: String, message: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home/data directory could not be resolved
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors. Raised before any state is touched.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Text field outside its allowed length
    #[error("'{field}' must be between {min} and {max} characters (got {len})")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
        len: usize,
    },

    /// Value outside of an allowed numeric range
    #[error("'{field}' must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },

    /// Operation requires a defined identity
    #[error("No identity has been defined yet")]
    NoIdentity,
}

/// Motivation generator errors. Always masked by a fallback message
/// before reaching the user.
#[derive(Error, Debug)]
pub enum MotivationError {
    /// Generation is switched off in the configuration
    #[error("Motivation generation is disabled")]
    Disabled,

    /// No API key available
    #[error("No API key configured for {service}")]
    MissingApiKey { service: String },

    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the model API
    #[error("Model API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// The model answered without any usable text
    #[error("Model returned an empty message")]
    EmptyResponse,
}

// Helper implementations for converting from other error types

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => match e.code {
                rusqlite::ErrorCode::DatabaseLocked | rusqlite::ErrorCode::DatabaseBusy => {
                    DatabaseError::Locked
                }
                rusqlite::ErrorCode::ConstraintViolation => {
                    DatabaseError::Duplicate(err.to_string())
                }
                _ => DatabaseError::QueryFailed(err.to_string()),
            },
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_kind() {
        let err = CoreError::habit_not_found("abc");
        assert_eq!(err.to_string(), "Habit not found: abc");
    }

    #[test]
    fn validation_error_wraps_into_core_error() {
        let err: CoreError = ValidationError::NoIdentity.into();
        assert!(matches!(err, CoreError::Validation(ValidationError::NoIdentity)));
    }

    #[test]
    fn query_returned_no_rows_maps_to_query_failed() {
        let err: DatabaseError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, DatabaseError::QueryFailed(_)));
    }
}
