//! Unified error type for the catalog application.
//!
//! All crates funnel their failures into [`Error`], which carries enough context
//! for API handlers to derive an HTTP status code via [`Error::http_status`].

use std::fmt;

/// Unified error type covering all failure modes in catalog.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "item").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A scalar request field failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Image content sniffed to a type outside the accepted image formats.
    #[error("Unsupported MIME type: {0}")]
    Mime(String),

    /// The image payload could not be decoded (bad base64 or unreadable header).
    #[error("Decode error: {0}")]
    Decode(String),

    /// A database operation failed.
    #[error("Database error: {source}")]
    Database {
        /// The underlying database error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::Validation(_) => 422,
            Error::Mime(_) => 415,
            Error::Decode(_) => 400,
            Error::Database { .. } => 500,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Whether this error was caused by the request content rather than the
    /// server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::Mime(_) | Error::Decode(_)
        )
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Database`].
    pub fn database(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Database {
            source: source.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = Error::not_found("item", "abc-123");
        assert_eq!(err.to_string(), "item not found: abc-123");
        assert_eq!(err.http_status(), 404);
        assert!(!err.is_client_error());
    }

    #[test]
    fn validation_display() {
        let err = Error::Validation("name is required".into());
        assert_eq!(err.to_string(), "Validation error: name is required");
        assert_eq!(err.http_status(), 422);
        assert!(err.is_client_error());
    }

    #[test]
    fn mime_display() {
        let err = Error::Mime("text/plain".into());
        assert_eq!(err.to_string(), "Unsupported MIME type: text/plain");
        assert_eq!(err.http_status(), 415);
        assert!(err.is_client_error());
    }

    #[test]
    fn decode_display() {
        let err = Error::Decode("invalid base64".into());
        assert_eq!(err.to_string(), "Decode error: invalid base64");
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn database_display() {
        let err = Error::database("connection refused");
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn internal_display() {
        let err = Error::Internal("unexpected state".into());
        assert_eq!(err.to_string(), "Internal error: unexpected state");
        assert_eq!(err.http_status(), 500);
    }
}
