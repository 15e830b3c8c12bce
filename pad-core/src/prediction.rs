//! Classifier output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PadError, PadResult};

/// A predicted digit and the classifier's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted digit, 0 through 9.
    pub digit: u8,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
}

impl Prediction {
    /// Create a validated prediction.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::InvalidPrediction`] if the digit is above 9 or the
    /// confidence is outside `[0, 1]`.
    pub fn new(digit: u8, confidence: f32) -> PadResult<Self> {
        let prediction = Self { digit, confidence };
        prediction.validate()?;
        Ok(prediction)
    }

    /// Check the documented value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::InvalidPrediction`] describing the first violation.
    pub fn validate(&self) -> PadResult<()> {
        if self.digit > 9 {
            return Err(PadError::InvalidPrediction(format!(
                "digit {} is not in 0..=9",
                self.digit
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(PadError::InvalidPrediction(format!(
                "confidence {} is not in [0, 1]",
                self.confidence
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a prediction object or is out of range.
    pub fn from_json(json: &str) -> PadResult<Self> {
        let prediction: Self = serde_json::from_str(json)?;
        prediction.validate()?;
        Ok(prediction)
    }

    /// Confidence formatted as a percentage with two decimals.
    #[must_use]
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", f64::from(self.confidence) * 100.0)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.digit, self.confidence_percent())
    }
}
