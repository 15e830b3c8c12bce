//! Encoded export payloads.

/// MIME type of every payload the exporter produces.
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// An encoded bitmap derived from the surface at one point in time.
///
/// Immutable once produced; the bytes are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    content_type: &'static str,
}

impl EncodedImage {
    /// Wrap PNG bytes of the given dimensions.
    ///
    /// Returns `None` for an empty payload.
    #[must_use]
    pub fn png(bytes: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        Some(Self {
            bytes,
            width,
            height,
            content_type: PNG_CONTENT_TYPE,
        })
    }

    /// The encoded bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the image, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Pixel width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// MIME type of the payload.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload holds no bytes. [`EncodedImage::png`] refuses
    /// empty payloads, so a constructed image returns `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
