//! Pad UI state.
//!
//! Holds what the shell shows next to the surface: whether a request is in
//! flight, the last prediction, or the last error. A prediction and an error
//! are never visible at the same time.

use crate::Prediction;

/// Progress of the most recent classification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// Nothing requested since the last clear.
    #[default]
    Idle,
    /// Export or request in flight.
    Loading,
    /// A prediction is available.
    Ready,
    /// The last attempt failed.
    Failed,
}

/// Visible result state of the pad.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PadState {
    status: RequestStatus,
    result: Option<Prediction>,
    error: Option<String>,
}

impl PadState {
    /// Create an idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A new export is starting: drop any previous result or error.
    pub fn begin_request(&mut self) {
        self.status = RequestStatus::Loading;
        self.result = None;
        self.error = None;
    }

    /// Record a successful prediction.
    pub fn complete(&mut self, prediction: Prediction) {
        tracing::debug!("Prediction ready: {prediction}");
        self.status = RequestStatus::Ready;
        self.result = Some(prediction);
        self.error = None;
    }

    /// Record a failure; any stale prediction is cleared.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("Prediction failed: {message}");
        self.status = RequestStatus::Failed;
        self.result = None;
        self.error = Some(message);
    }

    /// Explicit clear from the user.
    pub fn clear(&mut self) {
        self.result = None;
        self.error = None;
        if self.status != RequestStatus::Loading {
            self.status = RequestStatus::Idle;
        }
    }

    /// Current request status.
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// The visible prediction, if any.
    #[must_use]
    pub fn result(&self) -> Option<&Prediction> {
        self.result.as_ref()
    }

    /// The visible error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Human-readable panel text.
    #[must_use]
    pub fn summary(&self) -> String {
        match (self.status, &self.result, &self.error) {
            (RequestStatus::Loading, _, _) => "Predicting...".to_string(),
            (_, _, Some(error)) => format!("Error: {error}"),
            (_, Some(p), None) => {
                format!("Digit: {}\nConfidence: {}", p.digit, p.confidence_percent())
            }
            (_, None, None) => String::new(),
        }
    }
}
