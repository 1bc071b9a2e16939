//! Significance level checks.

use std::sync::LazyLock;

use regex::Regex;

use aam_model::{ExperimentError, Result};

/// Accepted alpha text: unsigned decimal, optional leading digits.
static ALPHA_INPUT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]+$").expect("Invalid alpha input regex"));

/// Both bounds are inclusive.
pub fn validate_alpha(alpha: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ExperimentError::Range(
            "Alpha must be between 0 and 1.".to_string(),
        ));
    }
    Ok(())
}

/// Parse alpha text typed by the user. Range is not checked here.
pub fn parse_alpha(input: &str) -> Result<f64> {
    if !ALPHA_INPUT_REGEX.is_match(input) {
        return Err(ExperimentError::Value(
            "Alpha must be a numeric value.".to_string(),
        ));
    }
    input
        .parse::<f64>()
        .map_err(|_| ExperimentError::Value("Alpha must be a numeric value.".to_string()))
}
