//! Label-to-type rule table.

use super::DetectionType;

/// Ordered rules: the first pattern contained in the lower-cased label wins.
///
/// Priority is by position in this table, not by where the pattern occurs
/// in the label, so "eggs and frass" is an egg detection.
pub const RULES: &[(&str, DetectionType)] = &[
    ("larval damage", DetectionType::FallArmywormLarvalDamage),
    ("eggs", DetectionType::FallArmywormEgg),
    ("frass", DetectionType::FallArmywormFrass),
    ("healthy", DetectionType::HealthyMaize),
];

/// Map a free-text label to a detection type.
///
/// Total: labels matching no rule are [`DetectionType::Unknown`].
pub fn classify(label: &str) -> DetectionType {
    let label = label.to_lowercase();
    RULES
        .iter()
        .find(|(pattern, _)| label.contains(pattern))
        .map_or(DetectionType::Unknown, |&(_, detection_type)| detection_type)
}
