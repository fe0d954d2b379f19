//! # catalog-image
//!
//! Inline image ingestion for catalog items.
//!
//! Images arrive as base64 text inside the JSON request body. This crate
//! turns that text into bytes and decides, from the bytes alone, whether
//! they are an image the catalog accepts:
//!
//! - [`decode_base64`] strips whitespace and any `data:` URL prefix, then decodes
//! - [`sniff_mime_type`] reads magic bytes; the client's declared type is never trusted
//! - [`validate_mime`] accepts only GIF, JPEG, BMP, and PNG
//! - [`extract_metadata`] reads dimensions and colour layout from the image header
//!
//! [`ingest`] runs all four in order.
//!
//! ## Quick start
//!
//! ```no_run
//! let image = catalog_image::ingest("iVBORw0KGgo...").unwrap();
//! println!("{} {}x{}", image.mime, image.metadata.width, image.metadata.height);
//! ```

mod decode;
mod metadata;
mod sniff;
pub mod types;

pub use decode::decode_base64;
pub use metadata::extract_metadata;
pub use sniff::{sniff_mime_type, validate_mime};
pub use types::{ImageMetadata, ImageMime, IngestedImage};

use catalog_core::{Error, Result};

/// Decode, sniff, allow-list check, and read metadata from a base64 payload.
///
/// Fails with [`Error::Decode`] on malformed base64 or an unreadable header,
/// and with [`Error::Mime`] when the content is not an accepted image type.
pub fn ingest(payload: &str) -> Result<IngestedImage> {
    let bytes = decode_base64(payload)?;
    let sniffed = sniff_mime_type(&bytes);
    let mime = validate_mime(sniffed)?;

    let metadata = extract_metadata(&bytes)?;
    if metadata.mime != mime.as_str() {
        return Err(Error::Decode(format!(
            "header decoded as {} but content sniffed as {}",
            metadata.mime, mime
        )));
    }

    tracing::debug!(
        mime = %mime,
        width = metadata.width,
        height = metadata.height,
        channels = metadata.channels,
        bit_depth = metadata.bit_depth,
        bytes = bytes.len(),
        "Ingested image payload"
    );

    Ok(IngestedImage {
        mime,
        metadata,
        bytes,
    })
}
