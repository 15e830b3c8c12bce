//! # Digit Pad Renderer
//!
//! Raster side of the pad: the stroke surface that turns input events into
//! pixels, and the exporter that turns pixels into PNG.
//!
//! ```text
//! ┌──────────────┐  InputEvent  ┌───────────────┐  pixels  ┌────────────────┐
//! │ host UI      │ ───────────▶ │ StrokeSurface │ ───────▶ │ RasterExporter │ ──▶ PNG
//! └──────────────┘              └───────────────┘          └────────────────┘
//! ```
//!
//! Rasterization and PNG encoding use tiny-skia; decoding uses the `image`
//! crate.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod image;
pub mod surface;

pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, ExportTarget, RasterExporter, ResampleFilter};
pub use surface::StrokeSurface;
