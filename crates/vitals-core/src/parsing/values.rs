use crate::error::VitalsError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a value typed into a lab entry form.
///
/// Handles formats like:
/// - "13.5" -> Some(13.5)
/// - "13,5" -> Some(13.5) (decimal comma)
/// - "  98 " -> Some(98)
/// - "", "   " -> None (nothing entered)
///
/// Anything else that is not a number, placeholders like "-" or "N/A"
/// included, is an error; the caller decides whether that is fatal.
pub fn parse_value(s: &str) -> Result<Option<Decimal>, VitalsError> {
    let s = s.trim();

    if s.is_empty() {
        return Ok(None);
    }

    parse_decimal(s).map(Some)
}

/// Parse a decimal value, accepting a comma as the decimal separator.
pub fn parse_decimal(s: &str) -> Result<Decimal, VitalsError> {
    let s = s.trim();
    let normalized = s.replace(',', ".");
    Decimal::from_str(&normalized)
        .map_err(|e| VitalsError::ParseError(format!("invalid number '{}': {}", s, e)))
}
