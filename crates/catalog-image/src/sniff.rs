//! Content-based MIME detection and the accepted-format check.

use catalog_core::{Error, Result};
use image::ImageFormat;

use crate::types::ImageMime;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Known DIB header sizes: CORE, INFO, V2, V3, OS/2 v2, V4, V5.
const BMP_DIB_HEADER_SIZES: [u32; 7] = [12, 40, 52, 56, 64, 108, 124];

/// Determine a MIME type from the leading bytes of `bytes`.
///
/// Image signatures are recognised by `image::guess_format`, so formats the
/// catalog does not accept (WebP, TIFF, ICO, ...) still get their real type
/// and can be reported precisely. Non-image content falls back to a small
/// set of generic types.
pub fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    if bytes.is_empty() {
        return "application/x-empty";
    }

    match image::guess_format(bytes) {
        // `guess_format` only checks the two-byte `BM` signature.
        Ok(ImageFormat::Bmp) if !has_bmp_header(bytes) => {}
        Ok(format) => return format.to_mime_type(),
        Err(_) => {}
    }

    if bytes.starts_with(PDF_MAGIC) {
        "application/pdf"
    } else if std::str::from_utf8(bytes).is_ok() {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

fn has_bmp_header(bytes: &[u8]) -> bool {
    bytes
        .get(14..18)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_le_bytes)
        .is_some_and(|size| BMP_DIB_HEADER_SIZES.contains(&size))
}

/// Accept only GIF, JPEG, BMP, and PNG.
///
/// Every other type, including undetectable content, fails the same way with
/// [`Error::Mime`] carrying the rejected type.
pub fn validate_mime(mime: &str) -> Result<ImageMime> {
    ImageMime::from_mime(mime).ok_or_else(|| Error::Mime(mime.to_string()))
}
