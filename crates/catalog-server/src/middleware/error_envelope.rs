//! Final rendering of error responses.
//!
//! Handlers do not know the request id or the configured status-code mode,
//! so [`AppError`](crate::error::AppError) leaves an [`ErrorReport`] on the
//! response and this layer re-renders the body from it.

use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::context::AppContext;
use crate::error::ErrorReport;
use crate::middleware::request_id::RequestId;

pub async fn error_envelope_middleware(
    State(ctx): State<AppContext>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());

    let response = next.run(request).await;

    match response.extensions().get::<ErrorReport>().cloned() {
        Some(report) => report.render(request_id.as_deref(), ctx.config.api.legacy_status_codes),
        None => response,
    }
}
