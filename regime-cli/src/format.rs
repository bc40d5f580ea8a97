//! pt-BR presentation helpers.

use rust_decimal::Decimal;

use regime_core::calculations::common::round_half_up;

/// Formats a number with two decimals in Brazilian notation: `1.234,56`.
pub fn format_number(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let plain = format!("{:.2}", rounded.abs());
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{fraction}")
}

/// Formats an amount in reais: `R$ 1.234,56`.
pub fn format_brl(value: Decimal) -> String {
    format!("R$ {}", format_number(value))
}

/// Formats a value that is already a percentage: `12,40%`.
pub fn format_percent(percent: Decimal) -> String {
    format!("{}%", format_number(percent))
}

/// Formats a fractional rate as a percentage: `0.073` → `7,30%`.
pub fn format_rate(rate: Decimal) -> String {
    format_percent(rate * Decimal::ONE_HUNDRED)
}
