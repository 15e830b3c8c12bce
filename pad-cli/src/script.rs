//! Recorded input for headless replay.
//!
//! A stroke script is a JSON document describing the surface and the exact
//! sequence of input events a host UI would deliver:
//!
//! ```json
//! {
//!   "width": 196,
//!   "height": 196,
//!   "left": 0.0,
//!   "top": 0.0,
//!   "events": [
//!     {"type": "Mouse", "data": {"phase": "down", "client_x": 10.0, "client_y": 10.0}},
//!     {"type": "Mouse", "data": {"phase": "move", "client_x": 50.0, "client_y": 50.0}},
//!     {"type": "Mouse", "data": {"phase": "up", "client_x": 50.0, "client_y": 50.0}}
//!   ]
//! }
//! ```

use std::path::Path;

use pad_core::{InputEvent, PadResult, SurfaceBounds, NATIVE_SIZE};
use pad_renderer::StrokeSurface;
use serde::{Deserialize, Serialize};

use crate::session::SessionError;

fn native_size() -> u32 {
    NATIVE_SIZE
}

/// Surface description plus the events to replay on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeScript {
    /// Raster width in pixels.
    #[serde(default = "native_size")]
    pub width: u32,
    /// Raster height in pixels.
    #[serde(default = "native_size")]
    pub height: u32,
    /// Client-space x offset of the surface.
    #[serde(default)]
    pub left: f32,
    /// Client-space y offset of the surface.
    #[serde(default)]
    pub top: f32,
    /// Events in delivery order.
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl StrokeScript {
    /// Parse a script from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a script.
    pub fn from_json(json: &str) -> PadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the file cannot be read and
    /// [`SessionError::Script`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let json = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let script = Self::from_json(&json)?;
        tracing::debug!(
            "Loaded script {} ({} events)",
            path.display(),
            script.events.len()
        );
        Ok(script)
    }

    /// On-screen bounds of the scripted surface.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero-sized surface or non-finite offset.
    #[allow(clippy::cast_precision_loss)]
    pub fn bounds(&self) -> PadResult<SurfaceBounds> {
        SurfaceBounds::new(self.left, self.top, self.width as f32, self.height as f32)
    }

    /// Replay the script on a fresh surface.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Script`] if the bounds are invalid and
    /// [`SessionError::Render`] if the surface cannot be created.
    pub fn render(&self) -> Result<StrokeSurface, SessionError> {
        let bounds = self.bounds()?;
        let mut surface = StrokeSurface::new(self.width, self.height)?;
        surface.set_bounds(bounds);
        for event in &self.events {
            surface.handle_event(event);
        }
        Ok(surface)
    }
}
