use winnow::prelude::*;
use winnow::token::take_while;

use crate::error::{UnitError, UnitResult};

/// Trim `text` and reject the inputs both grammars refuse up front:
/// empty / whitespace-only values and a leading `-`.
pub(crate) fn prepare(text: &str) -> UnitResult<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(UnitError::EmptyInput);
    }
    if trimmed.starts_with('-') {
        return Err(UnitError::NegativeNotAllowed(text.to_string()));
    }
    Ok(trimmed)
}

/// Maximal run of ASCII digits and dots at the front of the input.
fn number_span<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(0.., |c: char| c.is_ascii_digit() || c == '.').parse_next(input)
}

/// Consume one number span from `input` and parse it as a finite,
/// non-negative float.
///
/// The span must contain at least one digit and must be followed by at
/// least one more character (the unit). `text` is the whole original value
/// and is only used for error messages.
pub(crate) fn number(input: &mut &str, text: &str) -> UnitResult<f64> {
    let span = number_span(input).map_err(|_| UnitError::InvalidFormat(text.to_string()))?;
    if !span.bytes().any(|b| b.is_ascii_digit()) || input.is_empty() {
        return Err(UnitError::InvalidFormat(text.to_string()));
    }
    let value: f64 = span
        .parse()
        .map_err(|_| UnitError::InvalidNumber(span.to_string()))?;
    if !value.is_finite() {
        return Err(UnitError::InvalidNumber(span.to_string()));
    }
    Ok(value)
}
