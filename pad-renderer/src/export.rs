//! Surface export to PNG.
//!
//! The exporter either encodes the surface as-is or first stretches it into an
//! offscreen `n × n` raster with a single scaling draw. Both paths go through
//! tiny-skia's PNG encoder.

use std::future::Future;

use pad_core::{EncodedImage, PREVIEW_SIZE};
use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::error::{RenderError, RenderResult};
use crate::surface::StrokeSurface;

/// Output resolution of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportTarget {
    /// The surface's own dimensions; no resampling.
    #[default]
    Native,
    /// A square of the given edge length.
    Square(u32),
}

impl ExportTarget {
    /// The 28×28 normalized preview.
    #[must_use]
    pub const fn preview() -> Self {
        Self::Square(PREVIEW_SIZE)
    }

    /// Output dimensions for a surface of the given size.
    #[must_use]
    pub fn dimensions(self, native_width: u32, native_height: u32) -> (u32, u32) {
        match self {
            Self::Native => (native_width, native_height),
            Self::Square(n) => (n, n),
        }
    }

    /// Whether exporting a surface of this size needs a resampling pass.
    #[must_use]
    pub fn needs_resample(self, native_width: u32, native_height: u32) -> bool {
        self.dimensions(native_width, native_height) != (native_width, native_height)
    }
}

impl From<Option<u32>> for ExportTarget {
    fn from(size: Option<u32>) -> Self {
        size.map_or(Self::Native, Self::Square)
    }
}

/// Resampling filter used when the target differs from the native size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    /// Nearest neighbour.
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Bilinear,
    /// Bicubic interpolation.
    Bicubic,
}

impl From<ResampleFilter> for FilterQuality {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => Self::Nearest,
            ResampleFilter::Bilinear => Self::Bilinear,
            ResampleFilter::Bicubic => Self::Bicubic,
        }
    }
}

/// Configuration for surface export.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportConfig {
    /// Filter used by the scaling draw.
    pub filter: ResampleFilter,
}

/// Exports a [`StrokeSurface`] to PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterExporter {
    config: ExportConfig,
}

impl RasterExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Export the surface as PNG at the requested resolution.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidTarget`] for a zero-sized target and
    /// [`RenderError::Encode`] if encoding yields no bytes.
    pub fn export(
        &self,
        surface: &StrokeSurface,
        target: ExportTarget,
    ) -> RenderResult<EncodedImage> {
        encode(surface.pixmap(), surface.style().background, target, self.config)
    }

    /// Export asynchronously.
    ///
    /// The pixels are captured when this is called, so the surface can keep
    /// receiving strokes while the encode runs on a blocking worker. Must be
    /// awaited inside a tokio runtime.
    pub fn export_async(
        &self,
        surface: &StrokeSurface,
        target: ExportTarget,
    ) -> impl Future<Output = RenderResult<EncodedImage>> + Send + 'static {
        let snapshot = surface.pixmap().clone();
        let background = surface.style().background;
        let config = self.config;

        async move {
            tokio::task::spawn_blocking(move || encode(&snapshot, background, target, config))
                .await
                .map_err(|e| RenderError::Encode(format!("encode task failed: {e}")))?
        }
    }
}

fn encode(
    source: &Pixmap,
    background: [u8; 4],
    target: ExportTarget,
    config: ExportConfig,
) -> RenderResult<EncodedImage> {
    if target == ExportTarget::Square(0) {
        return Err(RenderError::InvalidTarget(
            "target size must be at least 1 pixel".to_string(),
        ));
    }

    let (w, h) = (source.width(), source.height());
    let encoded = if target.needs_resample(w, h) {
        resample(source, background, target, config.filter)?.encode_png()
    } else {
        source.encode_png()
    };
    let bytes = encoded.map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))?;

    let (out_w, out_h) = target.dimensions(w, h);
    tracing::debug!(
        "Exported {w}x{h} surface as {out_w}x{out_h} PNG ({} bytes)",
        bytes.len()
    );

    EncodedImage::png(bytes, out_w, out_h)
        .ok_or_else(|| RenderError::Encode("encoder produced no bytes".to_string()))
}

/// Stretch the whole source into a fresh `n × n` raster in one draw.
#[allow(clippy::cast_precision_loss)]
fn resample(
    source: &Pixmap,
    background: [u8; 4],
    target: ExportTarget,
    filter: ResampleFilter,
) -> RenderResult<Pixmap> {
    let (out_w, out_h) = target.dimensions(source.width(), source.height());
    let mut out = Pixmap::new(out_w, out_h).ok_or_else(|| {
        RenderError::InvalidTarget(format!("cannot allocate a {out_w}x{out_h} raster"))
    })?;

    let [r, g, b, a] = background;
    out.fill(Color::from_rgba8(r, g, b, a));

    let paint = PixmapPaint {
        quality: filter.into(),
        ..PixmapPaint::default()
    };
    let scale = Transform::from_scale(
        out_w as f32 / source.width() as f32,
        out_h as f32 / source.height() as f32,
    );
    out.draw_pixmap(0, 0, source.as_ref(), &paint, scale, None);
    Ok(out)
}
