use std::num::IntErrorKind;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// `1.234,56`, `50.000`, `-1.234.567,8`
static BR_GROUPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d{1,3}(\.\d{3})+(,\d+)?$").unwrap());

/// `1234,56`
static BR_DECIMAL_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+,\d+$").unwrap());

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing.
///
/// Strips a leading `R$` and whitespace. Brazilian notation (`.` for
/// thousands, `,` for decimals) is converted to plain notation; otherwise
/// commas are treated as thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    let unprefixed = trimmed.strip_prefix("R$").unwrap_or(trimmed);
    let compact: String = unprefixed.chars().filter(|c| !c.is_whitespace()).collect();

    if BR_GROUPED.is_match(&compact) || BR_DECIMAL_COMMA.is_match(&compact) {
        compact.replace('.', "").replace(',', ".")
    } else {
        compact.replace(',', "")
    }
}

/// Parses a string into a [`Decimal`].
///
/// Accepts `1234.56`, `1,234.56`, `1.234,56` and `R$ 1.234,56`.
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a string into an optional [`Decimal`].
///
/// Returns `None` for empty or whitespace-only input, which is how a blank
/// accumulated-revenue field reaches the engine.
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    if normalize_decimal_input(s).is_empty() {
        Ok(None)
    } else {
        parse_decimal(s).map(Some)
    }
}

/// Parses a service percentage the way the percentage field behaves:
/// integer part only, anything non-numeric becomes 0, and the result is
/// clamped to `[0, 100]`.
pub fn parse_service_percent(s: &str) -> i64 {
    let trimmed = s.trim().trim_end_matches('%').trim();
    let digits_end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(trimmed.len(), |(i, _)| i);

    let value = match trimmed[..digits_end].parse::<i64>() {
        Ok(value) => value,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
        Err(_) => {
            tracing::warn!(input = %s, "service percentage is not a number; using 0");
            0
        }
    };
    value.clamp(0, 100)
}
