//! Error types and result handling for spawn ingestion.
//!
//! Defines a structured error taxonomy with stable codes for client
//! disambiguation and HTTP status mapping by the transport layer. Covers
//! validation, connection, and write failures along the ingest path.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for storage operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Database session could not be established or was lost.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// Entity not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Constraint violation.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("requested entity not found".to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(err.to_string())
            },
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::ConstraintViolation(format!("unique constraint violation: {}", db_err))
            },
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                Self::ConstraintViolation(format!("foreign key constraint violation: {}", db_err))
            },
            _ => Self::Database(err.to_string()),
        }
    }
}

/// Ingest error taxonomy with codes surfaced to API clients.
///
/// Every failure is terminal for the request; nothing here is retried.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A database session could not be acquired (E1001).
    #[error("[E1001] database unavailable: {0}")]
    Connection(String),

    /// A query parameter could not be coerced to its semantic type (E1002).
    #[error("[E1002] invalid parameter {param}: cannot parse {value:?}")]
    Validation {
        /// Name of the offending query parameter.
        param: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// The upsert statement failed (E1003).
    ///
    /// The intentional duplicate-key path is tolerated by the statement
    /// itself and never reaches this variant.
    #[error("[E1003] write failed: {0}")]
    Write(String),
}

impl IngestError {
    /// Returns the stable error code (E1001-E1003).
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "E1001",
            Self::Validation { .. } => "E1002",
            Self::Write(_) => "E1003",
        }
    }

    /// Returns whether the failure was caused by client input.
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<CoreError> for IngestError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unavailable(msg) => Self::Connection(msg),
            other => Self::Write(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(IngestError::Connection("refused".into()).code(), "E1001");
        assert_eq!(
            IngestError::Validation { param: "latitude", value: "abc".into() }.code(),
            "E1002"
        );
        assert_eq!(IngestError::Write("broken".into()).code(), "E1003");
    }

    #[test]
    fn client_errors_identified() {
        assert!(IngestError::Validation { param: "latitude", value: "abc".into() }
            .is_client_error());
        assert!(!IngestError::Connection("refused".into()).is_client_error());
        assert!(!IngestError::Write("broken".into()).is_client_error());
    }

    #[test]
    fn validation_message_names_the_parameter() {
        let err = IngestError::Validation { param: "latitude", value: "abc".into() };
        let msg = err.to_string();
        assert!(msg.contains("latitude"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn pool_failures_translate_to_unavailable() {
        let core: CoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(core, CoreError::Unavailable(_)));

        let ingest: IngestError = core.into();
        assert_eq!(ingest.code(), "E1001");
    }

    #[test]
    fn row_not_found_translates_to_not_found() {
        let core: CoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(core, CoreError::NotFound(_)));
    }
}
