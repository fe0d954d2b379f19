//! Header-level image metadata extraction.

use std::io::Cursor;

use catalog_core::{Error, Result};
use image::{ImageDecoder, ImageReader};

use crate::types::ImageMetadata;

/// Read dimensions and colour layout from an image header.
///
/// Only the header is parsed; pixel data is not decoded. Content that is not
/// a readable image of a supported format yields [`Error::Decode`].
pub fn extract_metadata(bytes: &[u8]) -> Result<ImageMetadata> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Error::Decode(format!("failed to read image: {e}")))?;

    let format = reader
        .format()
        .ok_or_else(|| Error::Decode("unrecognised image format".into()))?;

    let decoder = reader
        .into_decoder()
        .map_err(|e| Error::Decode(format!("failed to read image header: {e}")))?;

    let (width, height) = decoder.dimensions();
    let color = decoder.original_color_type();
    let channels = color.channel_count();
    let bit_depth = color.bits_per_pixel() / u16::from(channels.max(1));

    Ok(ImageMetadata {
        width,
        height,
        channels,
        bit_depth,
        mime: format.to_mime_type(),
    })
}
