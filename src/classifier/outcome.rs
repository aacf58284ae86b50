//! Results handed over by the image classification collaborator.

use crate::error::{Error, Result};
use serde::Deserialize;

/// What the image classifier returned for one image.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationOutcome {
    /// The model produced a label.
    Success {
        /// Free-text result label.
        label: String,
        /// Confidence on a 0-100 scale, if reported.
        confidence: Option<f64>,
    },
    /// The model could not classify the image.
    Failure {
        /// Reason given by the collaborator.
        reason: String,
    },
}

/// Wire shape: `{"result": ..., "confidence": ...}` or `{"error": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireOutcome {
    Success {
        result: String,
        #[serde(default)]
        confidence: Option<f64>,
    },
    Failure {
        error: String,
    },
}

impl ClassificationOutcome {
    /// A successful result.
    pub fn success(label: impl Into<String>, confidence: Option<f64>) -> Self {
        Self::Success {
            label: label.into(),
            confidence,
        }
    }

    /// A failed result.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    /// Parse the collaborator's JSON result.
    ///
    /// Unrelated extra fields are ignored. A payload with neither `result`
    /// nor `error`, or with a non-numeric `confidence`, is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        let wire: WireOutcome = serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                Error::malformed(
                    "classification result must carry 'result' (with optional numeric 'confidence') or 'error'",
                )
            } else {
                Error::malformed(format!("classification result is not valid JSON: {e}"))
            }
        })?;

        Ok(match wire {
            WireOutcome::Success { result, confidence } => Self::Success {
                label: result,
                confidence,
            },
            WireOutcome::Failure { error } => Self::Failure { reason: error },
        })
    }
}
