//! Points and on-screen surface bounds.

use serde::{Deserialize, Serialize};

use crate::{PadError, PadResult};

/// A position in surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (pixels from the left edge).
    pub x: f32,
    /// Y coordinate (pixels from the top edge).
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The surface's bounding box in client (page) coordinates.
///
/// Pointer events arrive in client space; subtracting `left`/`top` yields
/// surface-local coordinates regardless of where the surface sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceBounds {
    /// Left edge in client coordinates.
    pub left: f32,
    /// Top edge in client coordinates.
    pub top: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl SurfaceBounds {
    /// Create bounds for a surface at the given client offset.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::InvalidSurface`] if the size is not positive and finite.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> PadResult<Self> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            return Err(PadError::InvalidSurface(format!(
                "bounds must have a positive size, got {width}x{height}"
            )));
        }
        if !left.is_finite() || !top.is_finite() {
            return Err(PadError::InvalidSurface(format!(
                "bounds offset must be finite, got ({left}, {top})"
            )));
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    /// Bounds anchored at the client origin.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::InvalidSurface`] for a zero-sized surface.
    #[allow(clippy::cast_precision_loss)]
    pub fn at_origin(width: u32, height: u32) -> PadResult<Self> {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    /// Translate client coordinates into surface-local coordinates.
    ///
    /// The result may be negative or exceed the surface size; callers clip.
    #[must_use]
    pub fn to_local(&self, client_x: f32, client_y: f32) -> Point {
        Point::new(client_x - self.left, client_y - self.top)
    }

    /// Whether a local point lies on the surface.
    #[must_use]
    pub fn contains_local(&self, point: Point) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x < self.width && point.y < self.height
    }
}
