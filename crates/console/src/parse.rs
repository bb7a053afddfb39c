//! Parsing for reporter configuration values.

use thiserror::Error;

/// Errors from [`parse_summary_interval`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SummaryIntervalError {
    /// The value was empty or contained a non-digit character.
    #[error("summary interval must be a whole number of emissions")]
    Invalid,
    /// The value was numeric but does not fit the counter width.
    #[error("summary interval exceeds the supported range")]
    OutOfRange,
}

/// Parses a summary-interval setting expressed in whole emissions.
///
/// Accepts plain decimal digits with optional surrounding ASCII
/// whitespace. `0` disables the summary block.
pub fn parse_summary_interval(text: &str) -> Result<u64, SummaryIntervalError> {
    let digits = text.trim_matches(|ch: char| ch.is_ascii_whitespace());
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(SummaryIntervalError::Invalid);
    }
    digits
        .parse::<u64>()
        .map_err(|_| SummaryIntervalError::OutOfRange)
}
