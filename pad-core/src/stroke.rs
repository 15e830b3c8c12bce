//! Freehand stroke state machine.
//!
//! [`step`] is a pure function from `(state, event)` to a new state plus the
//! side effects a host must perform. It never touches pixels, so the whole
//! drawing protocol is testable without a display.
//!
//! ```text
//!          down / touch start (on surface)
//!   Idle ───────────────────────────────▶ Drawing { last }
//!    ▲                                      │  move: DrawSegment(last → p)
//!    │   up / leave / touch end / cancel    │        last = p
//!    └──────────────────────────────────────┘
//! ```

use crate::{InputEvent, MousePhase, Point, SurfaceBounds, TouchEvent, TouchPhase};

/// Stroke width in pixels at the surface's native resolution.
pub const DEFAULT_STROKE_WIDTH: f32 = 12.0;

/// Drawing state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    /// No pointer is down.
    #[default]
    Idle,
    /// A stroke is in progress; `last` is the most recently rasterized point.
    Drawing {
        /// Start point of the next segment.
        last: Point,
    },
}

impl StrokeState {
    /// Whether a stroke is in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }
}

/// A straight line piece of a stroke in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Segment start.
    pub from: Point,
    /// Segment end.
    pub to: Point,
}

impl Segment {
    /// Whether both ends coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Rasterize a round-capped, round-joined segment.
    DrawSegment(Segment),
    /// Suppress the host's default touch behavior (scroll, zoom).
    PreventDefault,
}

/// Result of feeding one event to the state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transition {
    /// State after the event.
    pub state: StrokeState,
    /// Effects to perform, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(state: StrokeState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Segments to draw, in order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.effects.iter().filter_map(|e| match e {
            Effect::DrawSegment(s) => Some(s),
            Effect::PreventDefault => None,
        })
    }

    /// Whether the host should suppress its default handling of the event.
    #[must_use]
    pub fn prevents_default(&self) -> bool {
        self.effects.contains(&Effect::PreventDefault)
    }
}

/// Fixed stroke appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Line width in pixels.
    pub width: f32,
    /// Stroke color as RGBA bytes.
    pub foreground: [u8; 4],
    /// Background color as RGBA bytes.
    pub background: [u8; 4],
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: DEFAULT_STROKE_WIDTH,
            foreground: [255, 255, 255, 255],
            background: [0, 0, 0, 255],
        }
    }
}

/// Advance the state machine by one event.
#[must_use]
pub fn step(state: StrokeState, event: &InputEvent, bounds: &SurfaceBounds) -> Transition {
    match event {
        InputEvent::Mouse(mouse) => {
            let point = bounds.to_local(mouse.client_x, mouse.client_y);
            match mouse.phase {
                MousePhase::Down => press(state, point, bounds),
                MousePhase::Move => drag(state, point),
                MousePhase::Up | MousePhase::Leave => release(state),
            }
        }
        InputEvent::Touch(touch) => step_touch(state, touch, bounds),
    }
}

fn step_touch(state: StrokeState, touch: &TouchEvent, bounds: &SurfaceBounds) -> Transition {
    // Only the first contact draws; the rest of a multi-touch gesture is ignored.
    if touch.is_multi_touch() {
        tracing::trace!(
            "Ignoring {} extra touch contacts",
            touch.touches.len() - 1
        );
    }
    let primary = touch
        .primary_touch()
        .map(|t| bounds.to_local(t.client_x, t.client_y));

    match (touch.phase, primary) {
        (TouchPhase::Start, Some(point)) => {
            press(state, point, bounds).with(Effect::PreventDefault)
        }
        (TouchPhase::Move, Some(point)) => drag(state, point).with(Effect::PreventDefault),
        (TouchPhase::Start | TouchPhase::Move, None) => {
            Transition::to(state).with(Effect::PreventDefault)
        }
        (TouchPhase::End | TouchPhase::Cancel, _) => release(state),
    }
}

fn press(state: StrokeState, point: Point, bounds: &SurfaceBounds) -> Transition {
    if !bounds.contains_local(point) {
        tracing::trace!("Press outside surface at ({}, {})", point.x, point.y);
        return Transition::to(state);
    }
    if !state.is_drawing() {
        tracing::debug!("Stroke started at ({}, {})", point.x, point.y);
    }
    Transition::to(StrokeState::Drawing { last: point })
}

fn drag(state: StrokeState, point: Point) -> Transition {
    match state {
        StrokeState::Idle => Transition::to(state),
        StrokeState::Drawing { last } => {
            Transition::to(StrokeState::Drawing { last: point }).with(Effect::DrawSegment(
                Segment {
                    from: last,
                    to: point,
                },
            ))
        }
    }
}

fn release(state: StrokeState) -> Transition {
    if state.is_drawing() {
        tracing::debug!("Stroke finished");
    }
    Transition::to(StrokeState::Idle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TouchPoint;

    fn bounds() -> SurfaceBounds {
        SurfaceBounds::new(100.0, 50.0, 196.0, 196.0).unwrap()
    }

    fn run(events: &[InputEvent]) -> (StrokeState, Vec<Effect>) {
        let b = bounds();
        let mut state = StrokeState::Idle;
        let mut effects = Vec::new();
        for event in events {
            let t = step(state, event, &b);
            state = t.state;
            effects.extend(t.effects);
        }
        (state, effects)
    }

    #[test]
    fn mouse_down_enters_drawing_without_drawing() {
        let t = step(
            StrokeState::Idle,
            &InputEvent::mouse(MousePhase::Down, 110.0, 60.0),
            &bounds(),
        );
        assert_eq!(
            t.state,
            StrokeState::Drawing {
                last: Point::new(10.0, 10.0)
            }
        );
        assert!(t.effects.is_empty());
    }

    #[test]
    fn moves_chain_segments_from_last_point() {
        let (state, effects) = run(&[
            InputEvent::mouse(MousePhase::Down, 110.0, 60.0),
            InputEvent::mouse(MousePhase::Move, 120.0, 60.0),
            InputEvent::mouse(MousePhase::Move, 130.0, 75.0),
        ]);
        assert_eq!(
            effects,
            vec![
                Effect::DrawSegment(Segment {
                    from: Point::new(10.0, 10.0),
                    to: Point::new(20.0, 10.0),
                }),
                Effect::DrawSegment(Segment {
                    from: Point::new(20.0, 10.0),
                    to: Point::new(30.0, 25.0),
                }),
            ]
        );
        assert_eq!(
            state,
            StrokeState::Drawing {
                last: Point::new(30.0, 25.0)
            }
        );
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let (state, effects) = run(&[InputEvent::mouse(MousePhase::Move, 120.0, 60.0)]);
        assert_eq!(state, StrokeState::Idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn up_and_leave_end_the_stroke() {
        for phase in [MousePhase::Up, MousePhase::Leave] {
            let (state, effects) = run(&[
                InputEvent::mouse(MousePhase::Down, 110.0, 60.0),
                InputEvent::mouse(phase, 110.0, 60.0),
                InputEvent::mouse(MousePhase::Move, 150.0, 90.0),
            ]);
            assert_eq!(state, StrokeState::Idle);
            assert!(effects.is_empty(), "{phase:?} should stop drawing");
        }
    }

    #[test]
    fn press_outside_surface_stays_idle() {
        let (state, _) = run(&[InputEvent::mouse(MousePhase::Down, 10.0, 10.0)]);
        assert_eq!(state, StrokeState::Idle);
    }

    #[test]
    fn move_off_surface_still_draws() {
        let (_, effects) = run(&[
            InputEvent::mouse(MousePhase::Down, 110.0, 60.0),
            InputEvent::mouse(MousePhase::Move, 0.0, 0.0),
        ]);
        assert_eq!(
            effects,
            vec![Effect::DrawSegment(Segment {
                from: Point::new(10.0, 10.0),
                to: Point::new(-100.0, -50.0),
            })]
        );
    }

    #[test]
    fn only_first_touch_contact_draws() {
        let (_, effects) = run(&[
            InputEvent::touch(
                TouchPhase::Start,
                vec![
                    TouchPoint::new(0, 110.0, 60.0),
                    TouchPoint::new(1, 200.0, 200.0),
                ],
            ),
            InputEvent::touch(
                TouchPhase::Move,
                vec![
                    TouchPoint::new(0, 120.0, 70.0),
                    TouchPoint::new(1, 250.0, 210.0),
                ],
            ),
        ]);
        let segments: Vec<_> = effects
            .iter()
            .filter(|e| matches!(e, Effect::DrawSegment(_)))
            .collect();
        assert_eq!(
            segments,
            vec![&Effect::DrawSegment(Segment {
                from: Point::new(10.0, 10.0),
                to: Point::new(20.0, 20.0),
            })]
        );
    }

    #[test]
    fn touch_start_and_move_prevent_default() {
        let b = bounds();
        let start = step(
            StrokeState::Idle,
            &InputEvent::touch(TouchPhase::Start, vec![TouchPoint::new(0, 110.0, 60.0)]),
            &b,
        );
        assert!(start.prevents_default());
        let moved = step(
            start.state,
            &InputEvent::touch(TouchPhase::Move, vec![TouchPoint::new(0, 115.0, 60.0)]),
            &b,
        );
        assert!(moved.prevents_default());
        assert_eq!(moved.segments().count(), 1);

        let end = step(moved.state, &InputEvent::touch(TouchPhase::End, vec![]), &b);
        assert!(!end.prevents_default());
        assert_eq!(end.state, StrokeState::Idle);
    }

    #[test]
    fn touch_cancel_ends_stroke() {
        let (state, _) = run(&[
            InputEvent::touch(TouchPhase::Start, vec![TouchPoint::new(0, 110.0, 60.0)]),
            InputEvent::touch(TouchPhase::Cancel, vec![]),
        ]);
        assert_eq!(state, StrokeState::Idle);
    }

    #[test]
    fn second_touch_start_reanchors_without_drawing() {
        let (state, effects) = run(&[
            InputEvent::touch(TouchPhase::Start, vec![TouchPoint::new(0, 110.0, 60.0)]),
            InputEvent::touch(
                TouchPhase::Start,
                vec![
                    TouchPoint::new(0, 112.0, 61.0),
                    TouchPoint::new(1, 250.0, 210.0),
                ],
            ),
        ]);
        assert!(effects.iter().all(|e| *e == Effect::PreventDefault));
        assert_eq!(
            state,
            StrokeState::Drawing {
                last: Point::new(12.0, 11.0)
            }
        );
    }

    #[test]
    fn default_style_is_white_on_black() {
        let style = StrokeStyle::default();
        assert!((style.width - 12.0).abs() < f32::EPSILON);
        assert_eq!(style.foreground, [255, 255, 255, 255]);
        assert_eq!(style.background, [0, 0, 0, 255]);
    }
}
