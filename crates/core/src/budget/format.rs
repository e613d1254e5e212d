//! Currency display formatting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount for display: `$` prefix, exactly two fraction
/// digits, commas every three integer digits, half-up rounding at the
/// third decimal digit.
///
/// Negative amounts keep the sign after the symbol: `$-123.00`.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let unsigned = rounded.abs().to_string();
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .unwrap_or((unsigned.as_str(), ""));

    // round_dp guarantees at most two fraction digits; pad the rest.
    let mut frac = frac_part.to_string();
    while frac.len() < 2 {
        frac.push('0');
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("${sign}{}.{frac}", group_thousands(int_part))
}

/// Inserts a comma every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
