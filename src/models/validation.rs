//! Form validation errors.
//!
//! These are user-facing: they block submission in the UI and never reach
//! the network or cache layers.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field is missing or empty: {0}")]
    MissingField(&'static str),

    #[error("invalid duration: {0}")]
    InvalidDuration(String),
}

/// Parse a duration form field (minutes). Rejects non-numeric and
/// non-positive input before it can reach a request payload.
pub fn parse_duration(input: &str) -> Result<i64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("dauer"));
    }
    match trimmed.parse::<i64>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(ValidationError::InvalidDuration(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_minutes() {
        assert_eq!(parse_duration(" 45 "), Ok(45));
    }

    #[test]
    fn rejects_garbage_and_nonpositive_input() {
        assert!(matches!(
            parse_duration("eine Stunde"),
            Err(ValidationError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration("-5"),
            Err(ValidationError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration(""),
            Err(ValidationError::MissingField("dauer"))
        ));
    }
}
