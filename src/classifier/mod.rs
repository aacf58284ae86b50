//! Detection classification.
//!
//! Turns a collaborator's free-text result into one of a closed set of
//! detection types and normalizes its confidence to `0.0..=1.0`.

mod outcome;
mod rules;

pub use outcome::ClassificationOutcome;
pub use rules::{RULES, classify};

use crate::constants::confidence::PERCENT_SCALE;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of detection types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionType {
    /// Larval feeding damage.
    FallArmywormLarvalDamage,
    /// Egg masses.
    FallArmywormEgg,
    /// Larval excrement.
    FallArmywormFrass,
    /// No sign of infestation.
    HealthyMaize,
    /// Label matched no known type. Recorded, not rejected.
    Unknown,
}

impl DetectionType {
    /// All types, in rule priority order with `Unknown` last.
    pub const ALL: [Self; 5] = [
        Self::FallArmywormLarvalDamage,
        Self::FallArmywormEgg,
        Self::FallArmywormFrass,
        Self::HealthyMaize,
        Self::Unknown,
    ];

    /// Stored tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FallArmywormLarvalDamage => "fall-armyworm-larval-damage",
            Self::FallArmywormEgg => "fall-armyworm-egg",
            Self::FallArmywormFrass => "fall-armyworm-frass",
            Self::HealthyMaize => "healthy-maize",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DetectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown detection type: {s}"))
    }
}

/// A classified result, ready to be recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Detection type.
    pub detection_type: DetectionType,
    /// Confidence in `0.0..=1.0` (not clamped).
    pub confidence: f64,
}

impl ClassificationOutcome {
    /// Classify a collaborator result.
    ///
    /// A [`ClassificationOutcome::Failure`] becomes
    /// [`Error::ClassificationFailed`]; nothing is recorded for it.
    pub fn classify(&self) -> Result<Classification> {
        match self {
            Self::Success { label, confidence } => Ok(Classification {
                detection_type: classify(label),
                confidence: normalize_confidence(*confidence)?,
            }),
            Self::Failure { reason } => Err(Error::ClassificationFailed {
                reason: reason.clone(),
            }),
        }
    }
}

/// Convert a 0-100 percentage into a 0.0-1.0 fraction.
///
/// Missing confidence is 0. Implausible values are passed through scaled;
/// only non-numbers are rejected.
pub fn normalize_confidence(percent: Option<f64>) -> Result<f64> {
    let percent = percent.unwrap_or(0.0);
    if !percent.is_finite() {
        return Err(Error::malformed(format!(
            "confidence must be a finite number, got {percent}"
        )));
    }
    Ok(percent / PERCENT_SCALE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_type_round_trips_through_tag() {
        for t in DetectionType::ALL {
            assert_eq!(t.as_str().parse::<DetectionType>().unwrap(), t);
        }
        assert!("armyworm".parse::<DetectionType>().is_err());
    }

    #[test]
    fn test_detection_type_serializes_as_tag() {
        let json = serde_json::to_string(&DetectionType::FallArmywormLarvalDamage).unwrap();
        assert_eq!(json, "\"fall-armyworm-larval-damage\"");
    }

    #[test]
    fn test_normalize_confidence() {
        assert_eq!(normalize_confidence(Some(92.0)).unwrap(), 0.92);
        assert_eq!(normalize_confidence(Some(100.0)).unwrap(), 1.0);
        assert_eq!(normalize_confidence(None).unwrap(), 0.0);
    }

    #[test]
    fn test_normalize_confidence_passes_implausible_values() {
        assert_eq!(normalize_confidence(Some(250.0)).unwrap(), 2.5);
        assert_eq!(normalize_confidence(Some(-10.0)).unwrap(), -0.1);
    }

    #[test]
    fn test_normalize_confidence_rejects_nan() {
        assert!(matches!(
            normalize_confidence(Some(f64::NAN)),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_outcome_classify_success() {
        let classification = ClassificationOutcome::success("Larval damage observed", Some(92.0))
            .classify()
            .unwrap();
        assert_eq!(
            classification.detection_type,
            DetectionType::FallArmywormLarvalDamage
        );
        assert_eq!(classification.confidence, 0.92);
    }

    #[test]
    fn test_outcome_classify_failure() {
        let err = ClassificationOutcome::failure("blurred image")
            .classify()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ClassificationFailed { ref reason } if reason == "blurred image"
        ));
    }
}
