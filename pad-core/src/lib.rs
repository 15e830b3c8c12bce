//! # Digit Pad Core
//!
//! Pure drawing-pad logic with no rendering backend and no IO.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  pad-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Input           │  Stroke Machine          │
//! │  - Mouse events  │  - Idle / Drawing        │
//! │  - Touch events  │  - Segment effects       │
//! │  - Client coords │  - Default suppression   │
//! ├─────────────────────────────────────────────┤
//! │  Prediction      │  Pad State               │
//! │  - Digit 0..=9   │  - Loading / result      │
//! │  - Confidence    │  - Error message         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The raster itself lives in `pad-renderer`; this crate only decides *what*
//! to draw.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod artifact;
pub mod error;
pub mod event;
pub mod geometry;
pub mod prediction;
pub mod state;
pub mod stroke;

pub use artifact::{EncodedImage, PNG_CONTENT_TYPE};
pub use error::{PadError, PadResult};
pub use event::{InputEvent, MouseEvent, MousePhase, TouchEvent, TouchPhase, TouchPoint};
pub use geometry::{Point, SurfaceBounds};
pub use prediction::Prediction;
pub use state::{PadState, RequestStatus};
pub use stroke::{step, Effect, Segment, StrokeState, StrokeStyle, Transition};

/// Native edge length of the drawing surface in pixels.
pub const NATIVE_SIZE: u32 = 196;

/// Edge length of the normalized low-resolution preview.
pub const PREVIEW_SIZE: u32 = 28;

/// Pad core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
