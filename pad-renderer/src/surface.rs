//! The stroke surface: a fixed-size raster driven by the stroke state machine.

use pad_core::{
    step, Effect, InputEvent, Segment, StrokeState, StrokeStyle, SurfaceBounds, Transition,
};
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

use crate::error::{RenderError, RenderResult};

/// A raster canvas that turns pointer input into freehand strokes.
///
/// Pixels are stored as premultiplied RGBA. The background is opaque, so
/// every pixel stays fully opaque and premultiplied equals straight alpha.
#[derive(Debug, Clone)]
pub struct StrokeSurface {
    pixmap: Pixmap,
    state: StrokeState,
    bounds: SurfaceBounds,
    style: StrokeStyle,
}

impl StrokeSurface {
    /// Create a surface with the default white-on-black style.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SurfaceInit`] if the raster cannot be allocated.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Self::with_style(width, height, StrokeStyle::default())
    }

    /// Create a surface with a custom stroke style.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SurfaceInit`] if the raster cannot be allocated.
    pub fn with_style(width: u32, height: u32, style: StrokeStyle) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::SurfaceInit(format!("cannot allocate a {width}x{height} raster"))
        })?;
        let bounds = SurfaceBounds::at_origin(width, height)
            .map_err(|e| RenderError::SurfaceInit(e.to_string()))?;

        let mut surface = Self {
            pixmap,
            state: StrokeState::Idle,
            bounds,
            style,
        };
        surface.fill_background();
        tracing::debug!("Stroke surface created: {width}x{height}");
        Ok(surface)
    }

    /// Update the on-screen bounding box (after scroll or layout changes).
    pub fn set_bounds(&mut self, bounds: SurfaceBounds) {
        self.bounds = bounds;
    }

    /// Feed one input event and rasterize any resulting segments.
    ///
    /// The returned transition tells the host whether to suppress its default
    /// handling of the event.
    pub fn handle_event(&mut self, event: &InputEvent) -> Transition {
        let transition = step(self.state, event, &self.bounds);
        for effect in &transition.effects {
            if let Effect::DrawSegment(segment) = effect {
                self.draw_segment(segment);
            }
        }
        self.state = transition.state;
        transition
    }

    /// Rasterize one segment with round caps and joins.
    ///
    /// Anything outside the raster is clipped.
    pub fn draw_segment(&mut self, segment: &Segment) {
        let mut paint = Paint::default();
        let [r, g, b, a] = self.style.foreground;
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        if segment.is_degenerate() {
            // A zero-length round-capped line is a dot of the stroke diameter.
            if let Some(dot) =
                PathBuilder::from_circle(segment.from.x, segment.from.y, self.style.width / 2.0)
            {
                self.pixmap
                    .fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
            }
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(segment.from.x, segment.from.y);
        pb.line_to(segment.to.x, segment.to.y);
        let Some(path) = pb.finish() else {
            tracing::trace!("Skipping unbuildable segment {segment:?}");
            return;
        };

        let stroke = Stroke {
            width: self.style.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    /// Clear to transparent, then fill with the background color.
    ///
    /// The stroke state is left untouched.
    pub fn reset(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
        self.fill_background();
        tracing::debug!("Stroke surface reset");
    }

    fn fill_background(&mut self) {
        let [r, g, b, a] = self.style.background;
        self.pixmap.fill(Color::from_rgba8(r, g, b, a));
    }

    /// Current drawing state.
    #[must_use]
    pub fn state(&self) -> StrokeState {
        self.state
    }

    /// On-screen bounding box used for coordinate mapping.
    #[must_use]
    pub fn bounds(&self) -> &SurfaceBounds {
        &self.bounds
    }

    /// Stroke appearance.
    #[must_use]
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Raster width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Raster height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Raw RGBA bytes, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// RGBA of a single pixel, or `None` outside the raster.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap
            .pixel(x, y)
            .map(|c| [c.red(), c.green(), c.blue(), c.alpha()])
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pad_core::{MousePhase, Point};

    #[test]
    fn new_surface_is_background_filled() {
        let surface = StrokeSurface::new(8, 8).unwrap();
        assert!(surface
            .pixels()
            .chunks_exact(4)
            .all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn zero_sized_surface_fails_to_initialize() {
        assert!(matches!(
            StrokeSurface::new(0, 196),
            Err(RenderError::SurfaceInit(_))
        ));
    }

    #[test]
    fn press_alone_draws_nothing() {
        let mut surface = StrokeSurface::new(64, 64).unwrap();
        surface.handle_event(&InputEvent::mouse(MousePhase::Down, 32.0, 32.0));
        assert_eq!(surface.pixel(32, 32), Some([0, 0, 0, 255]));
        assert!(surface.state().is_drawing());
    }

    #[test]
    fn horizontal_segment_has_stroke_width() {
        let mut surface = StrokeSurface::new(64, 64).unwrap();
        surface.draw_segment(&Segment {
            from: Point::new(10.0, 32.0),
            to: Point::new(50.0, 32.0),
        });
        // Rows 27..=36 are fully inside the 12px band centered on y = 32.
        for y in 27..=36 {
            assert_eq!(surface.pixel(30, y), Some([255, 255, 255, 255]), "row {y}");
        }
        assert_eq!(surface.pixel(30, 20), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(30, 44), Some([0, 0, 0, 255]));
    }

    #[test]
    fn round_caps_extend_past_endpoints() {
        let mut surface = StrokeSurface::new(64, 64).unwrap();
        surface.draw_segment(&Segment {
            from: Point::new(20.0, 32.0),
            to: Point::new(40.0, 32.0),
        });
        assert_eq!(surface.pixel(16, 32), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(44, 32).map(|p| p[0] > 200), Some(true));
        assert_eq!(surface.pixel(50, 32), Some([0, 0, 0, 255]));
    }

    #[test]
    fn degenerate_segment_draws_dot() {
        let mut surface = StrokeSurface::new(64, 64).unwrap();
        surface.draw_segment(&Segment {
            from: Point::new(32.0, 32.0),
            to: Point::new(32.0, 32.0),
        });
        assert_eq!(surface.pixel(32, 32), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(45, 32), Some([0, 0, 0, 255]));
    }

    #[test]
    fn reset_keeps_state_machine_state() {
        let mut surface = StrokeSurface::new(64, 64).unwrap();
        surface.handle_event(&InputEvent::mouse(MousePhase::Down, 10.0, 10.0));
        surface.handle_event(&InputEvent::mouse(MousePhase::Move, 40.0, 40.0));
        surface.reset();
        assert!(surface.state().is_drawing());
        assert!(surface
            .pixels()
            .chunks_exact(4)
            .all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn bounds_offset_is_applied() {
        let mut surface = StrokeSurface::new(64, 64).unwrap();
        surface.set_bounds(SurfaceBounds::new(300.0, 200.0, 64.0, 64.0).unwrap());
        surface.handle_event(&InputEvent::mouse(MousePhase::Down, 310.0, 232.0));
        surface.handle_event(&InputEvent::mouse(MousePhase::Move, 350.0, 232.0));
        assert_eq!(surface.pixel(30, 32), Some([255, 255, 255, 255]));
    }
}
