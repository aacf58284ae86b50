//! CLI argument validators.
//!
//! Coordinates and confidences only have to be finite; range checks are
//! left to the caller.

/// Parse a finite float, naming `what` in the error.
pub fn parse_finite_float(s: &str, what: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() {
        return Err(format!("{what} must be finite, got {value}"));
    }

    Ok(value)
}

/// Parse a latitude or longitude in decimal degrees.
pub fn parse_coordinate(s: &str) -> Result<f64, String> {
    parse_finite_float(s, "coordinate")
}

/// Parse a detector confidence expressed as a percentage.
pub fn parse_percent(s: &str) -> Result<f64, String> {
    parse_finite_float(s, "confidence")
}
