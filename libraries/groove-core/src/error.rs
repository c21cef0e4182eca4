/// Core error types for Groove Catalog
use thiserror::Error;

/// Result type alias using `GrooveError`
pub type Result<T> = std::result::Result<T, GrooveError>;

/// Core error type for Groove Catalog
#[derive(Error, Debug)]
pub enum GrooveError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violated (username, genre name)
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid input, including references to missing entities
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl GrooveError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a duplicate entry error
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for GrooveError {
    fn from(err: sqlx::Error) -> Self {
        // Constraint violations are caller mistakes, not storage failures
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return Self::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
                return Self::InvalidInput(db_err.message().to_string());
            }
        }
        Self::Database(err.to_string())
    }
}
