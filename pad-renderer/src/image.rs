//! Reading encoded payloads back.
//!
//! Used to inspect exports, to accept an existing PNG for submission, and to
//! move payloads through `data:` URIs.

use base64::Engine;
use pad_core::{EncodedImage, PNG_CONTENT_TYPE};

use crate::error::{RenderError, RenderResult};

/// Decoded RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel).
    pub data: Vec<u8>,
}

impl DecodedImage {
    /// RGBA of a single pixel, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// The eight-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Whether the bytes start with the PNG signature.
#[must_use]
pub fn is_png(data: &[u8]) -> bool {
    data.starts_with(&PNG_SIGNATURE)
}

/// Decode PNG bytes into RGBA pixels.
///
/// # Errors
///
/// Returns [`RenderError::Decode`] if the bytes are not a readable PNG.
pub fn decode(data: &[u8]) -> RenderResult<DecodedImage> {
    if !is_png(data) {
        let head = &data[..data.len().min(PNG_SIGNATURE.len())];
        return Err(RenderError::Decode(format!(
            "missing PNG signature (starts with {head:02x?})"
        )));
    }

    let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)
        .map_err(|e| RenderError::Decode(format!("Failed to decode image: {e}")))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        width,
        height,
        data: rgba.into_raw(),
    })
}

/// Wrap existing PNG bytes (e.g. read from disk) as an [`EncodedImage`].
///
/// # Errors
///
/// Returns [`RenderError::Decode`] if the bytes are not a readable PNG.
pub fn encoded_from_png(bytes: Vec<u8>) -> RenderResult<EncodedImage> {
    let decoded = decode(&bytes)?;
    EncodedImage::png(bytes, decoded.width, decoded.height)
        .ok_or_else(|| RenderError::Decode("empty payload".to_string()))
}

/// Render an encoded image as a base64 `data:` URI.
#[must_use]
pub fn to_data_uri(image: &EncodedImage) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(image.bytes());
    format!("data:{};base64,{encoded}", image.content_type())
}

/// Load a PNG from a base64 `data:` URI.
///
/// Supports URIs like `data:image/png;base64,iVBORw0KGgo...`.
///
/// # Errors
///
/// Returns an error if the URI is malformed or does not hold a PNG.
pub fn from_data_uri(uri: &str) -> RenderResult<EncodedImage> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| RenderError::Decode("Not a data URI".to_string()))?;

    let (metadata, payload) = rest
        .split_once(',')
        .ok_or_else(|| RenderError::Decode("Invalid data URI: missing comma".to_string()))?;

    if !metadata.starts_with(PNG_CONTENT_TYPE) || !metadata.contains(";base64") {
        return Err(RenderError::Decode(format!(
            "unsupported data URI metadata: {metadata}"
        )));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| RenderError::Decode(format!("Failed to decode base64: {e}")))?;

    encoded_from_png(bytes)
}
