//! Base64 payload decoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use catalog_core::{Error, Result};

/// Decode a standard-alphabet base64 image payload.
///
/// ASCII whitespace (line-wrapped encoders) is ignored, and a leading
/// `data:<type>;base64,` prefix is removed. The type named in the prefix is
/// discarded; only the content decides the MIME type.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>> {
    let body = strip_data_url(payload.trim());
    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| Error::Decode(format!("invalid base64 payload: {e}")))
}

fn strip_data_url(payload: &str) -> &str {
    payload
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, data)| data)
        .unwrap_or(payload)
}
