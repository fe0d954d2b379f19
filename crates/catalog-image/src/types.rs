//! Result types for image ingestion.

use std::fmt;

use catalog_core::ItemImage;
use serde::{Serialize, Serializer};

/// The image formats an item may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMime {
    Gif,
    Jpeg,
    Bmp,
    Png,
}

impl ImageMime {
    /// Every accepted format.
    pub const ALL: [ImageMime; 4] = [Self::Gif, Self::Jpeg, Self::Bmp, Self::Png];

    /// The MIME string stored alongside the image bytes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gif => "image/gif",
            Self::Jpeg => "image/jpeg",
            Self::Bmp => "image/bmp",
            Self::Png => "image/png",
        }
    }

    /// Look up an accepted format by MIME string. Anything else is `None`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == mime)
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ImageMime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Intrinsic properties read from an image header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Colour channels per pixel as stored in the file (3 for RGB, 4 for RGBA).
    pub channels: u8,
    /// Bits per channel as stored in the file.
    pub bit_depth: u16,
    /// MIME type of the decoded format.
    pub mime: &'static str,
}

/// A payload that passed every ingestion check.
#[derive(Debug, Clone)]
pub struct IngestedImage {
    pub mime: ImageMime,
    pub metadata: ImageMetadata,
    /// The decoded image bytes, exactly as sent.
    pub bytes: Vec<u8>,
}

impl IngestedImage {
    /// Drop the metadata and keep what an item stores.
    pub fn into_item_image(self) -> ItemImage {
        ItemImage {
            mime: self.mime.as_str().to_string(),
            data: self.bytes,
        }
    }
}
