//! Error-to-HTTP response conversion.
//!
//! Route handlers return `Result<T, AppError>`. The response produced by
//! [`AppError`] carries an [`ErrorReport`] in its extensions so that the
//! error envelope middleware can re-render it with the request id and the
//! configured status-code mode.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::Error;
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: Error,
}

impl AppError {
    pub fn new(inner: Error) -> Self {
        Self { inner }
    }
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        Self::new(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(Error::Validation(format!(
            "request body is not a valid item: {}",
            rejection.body_text()
        )))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(Error::Validation(format!(
            "invalid path parameter: {}",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = ErrorReport::from_error(&self.inner);

        if report.status.is_server_error() {
            tracing::error!(
                status = %report.status(false),
                error = %self.inner,
                "Server error in API handler"
            );
        } else {
            tracing::debug!(error = %self.inner, "Request rejected");
        }

        let mut response = report.render(None, false);
        response.extensions_mut().insert(report);
        response
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    NotFound,
    Validation,
    Mime,
    Decode,
    Server,
}

/// What the client is told about a failed request.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    kind: ErrorKind,
    status: StatusCode,
    client_error: bool,
    message: String,
}

impl ErrorReport {
    pub fn from_error(err: &Error) -> Self {
        let kind = match err {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Mime(_) => ErrorKind::Mime,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Database { .. } | Error::Io { .. } | Error::Internal(_) => ErrorKind::Server,
        };

        // Storage and I/O details stay in the server log.
        let message = match kind {
            ErrorKind::Server => "Internal server error".to_string(),
            _ => err.to_string(),
        };

        Self {
            kind,
            status: StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            client_error: err.is_client_error(),
            message,
        }
    }

    /// HTTP status. In legacy mode request-content failures answer 200.
    pub fn status(&self, legacy: bool) -> StatusCode {
        if legacy && self.client_error {
            StatusCode::OK
        } else {
            self.status
        }
    }

    /// The `status` field of the JSON body.
    pub fn status_text(&self, legacy: bool) -> &'static str {
        match self.kind {
            // Spelling kept for clients of the earlier service.
            ErrorKind::Validation if legacy => "Varidation Error",
            ErrorKind::Validation => "Validation Error",
            ErrorKind::Mime => "MIMEtype Error",
            ErrorKind::Decode => "Decode Error",
            ErrorKind::NotFound => "NOT-FOUND",
            ErrorKind::Server => "Server Error",
        }
    }

    pub fn render(&self, request_id: Option<&str>, legacy: bool) -> Response {
        let body = json!({
            "status": self.status_text(legacy),
            "message": self.message,
            "request_id": request_id,
        });

        (self.status(legacy), axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_produces_404() {
        let err = AppError::new(Error::not_found("item", "abc"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ErrorReport>().is_some());
    }

    #[test]
    fn client_errors_map_to_4xx() {
        let cases = [
            (Error::Validation("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (Error::Mime("text/plain".into()), StatusCode::UNSUPPORTED_MEDIA_TYPE),
            (Error::Decode("bad".into()), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::new(err).into_response().status(), status);
        }
    }

    #[test]
    fn server_errors_hide_details() {
        let report = ErrorReport::from_error(&Error::database("disk I/O error"));
        assert_eq!(report.status(false), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(report.status(true), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(report.status_text(false), "Server Error");
        assert!(!report.message.contains("disk"));
    }

    #[test]
    fn legacy_mode_answers_200() {
        let validation = ErrorReport::from_error(&Error::Validation("name is required".into()));
        assert_eq!(validation.status(true), StatusCode::OK);
        assert_eq!(validation.status_text(true), "Varidation Error");
        assert_eq!(validation.status_text(false), "Validation Error");

        let mime = ErrorReport::from_error(&Error::Mime("application/pdf".into()));
        assert_eq!(mime.status(true), StatusCode::OK);
        assert_eq!(mime.status_text(true), "MIMEtype Error");

        let missing = ErrorReport::from_error(&Error::not_found("item", "x"));
        assert_eq!(missing.status(true), StatusCode::NOT_FOUND);
        assert_eq!(missing.status_text(true), "NOT-FOUND");
    }
}
