//! HTTP middleware: request ID and error envelope.

pub mod error_envelope;
pub mod request_id;
