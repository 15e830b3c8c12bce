//! Input events for pad interaction.
//!
//! All positions are in client (page) coordinates, exactly as a host UI
//! delivers them. Translation to surface-local space happens in
//! [`crate::stroke::step`].

use serde::{Deserialize, Serialize};

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// Touch started (finger down).
    Start,
    /// Touch moved (finger dragging).
    Move,
    /// Touch ended (finger up).
    End,
    /// Touch cancelled (e.g., palm rejection).
    Cancel,
}

/// A single touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    #[serde(default)]
    pub id: u32,
    /// X position in client coordinates.
    pub client_x: f32,
    /// Y position in client coordinates.
    pub client_y: f32,
}

impl TouchPoint {
    /// Create a touch point.
    #[must_use]
    pub const fn new(id: u32, client_x: f32, client_y: f32) -> Self {
        Self {
            id,
            client_x,
            client_y,
        }
    }
}

/// A touch event with zero or more active contacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Phase of this touch event.
    pub phase: TouchPhase,
    /// All currently active touch points, in host order.
    #[serde(default)]
    pub touches: Vec<TouchPoint>,
    /// Timestamp in milliseconds since the pad was created.
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>, timestamp_ms: u64) -> Self {
        Self {
            phase,
            touches,
            timestamp_ms,
        }
    }

    /// Get the primary (first) touch point.
    #[must_use]
    pub fn primary_touch(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }

    /// Check if this is a multi-touch event.
    #[must_use]
    pub fn is_multi_touch(&self) -> bool {
        self.touches.len() > 1
    }
}

/// Phase of a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MousePhase {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
    /// Pointer left the surface.
    Leave,
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseEvent {
    /// Phase of this mouse event.
    pub phase: MousePhase,
    /// X position in client coordinates.
    pub client_x: f32,
    /// Y position in client coordinates.
    pub client_y: f32,
    /// Timestamp in milliseconds since the pad was created.
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(phase: MousePhase, client_x: f32, client_y: f32) -> Self {
        Self {
            phase,
            client_x,
            client_y,
            timestamp_ms: 0,
        }
    }
}

/// All input events the pad can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// Mouse event.
    Mouse(MouseEvent),
    /// Touch event.
    Touch(TouchEvent),
}

impl InputEvent {
    /// Shorthand for a mouse event.
    #[must_use]
    pub const fn mouse(phase: MousePhase, client_x: f32, client_y: f32) -> Self {
        Self::Mouse(MouseEvent::new(phase, client_x, client_y))
    }

    /// Shorthand for a touch event with the given contacts.
    #[must_use]
    pub fn touch(phase: TouchPhase, touches: Vec<TouchPoint>) -> Self {
        Self::Touch(TouchEvent::new(phase, touches, 0))
    }

    /// Whether this event came from a touch surface.
    #[must_use]
    pub fn is_touch(&self) -> bool {
        matches!(self, Self::Touch(_))
    }
}
