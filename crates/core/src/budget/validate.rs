//! Validation of raw request input.
//!
//! Numeric fields arrive as raw strings (HTML form values or JSON
//! scalars). These helpers parse and validate them in one step and carry
//! the exact user-facing message for each failure. Pure functions, no
//! side effects.

use rust_decimal::Decimal;

use super::error::BudgetError;

/// Parses a month duration, which must be the integer 1 or 12.
///
/// Fractional strings like `"1.5"` are rejected as non-integers, never
/// truncated.
///
/// # Errors
///
/// Returns `BudgetError::NotANumber` when `raw` is not an integer and
/// `BudgetError::InvalidValue` when the integer is neither 1 nor 12.
pub fn parse_month_duration(raw: &str) -> Result<i32, BudgetError> {
    let duration: i32 = raw.trim().parse().map_err(|_| {
        BudgetError::NotANumber("Month duration must be a whole number (1 or 12).".to_string())
    })?;

    if duration == 1 || duration == 12 {
        Ok(duration)
    } else {
        Err(BudgetError::InvalidValue(
            "Month duration must be 1 (month) or 12 (year).".to_string(),
        ))
    }
}

/// Parses a non-negative monetary amount. Zero is allowed.
///
/// `field` is the display name prefixed onto failure messages, e.g.
/// "Gross income must be a valid number.".
///
/// # Errors
///
/// Returns `BudgetError::NotANumber` when `raw` is not a decimal number
/// and `BudgetError::NegativeValue` when it is below zero.
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal, BudgetError> {
    let amount: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| BudgetError::NotANumber(format!("{field} must be a valid number.")))?;

    if amount < Decimal::ZERO {
        return Err(BudgetError::NegativeValue(format!(
            "{field} must be a non negative number."
        )));
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("1", 1)]
    #[case("12", 12)]
    #[case(" 12 ", 12)]
    fn test_duration_valid(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(parse_month_duration(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("2")]
    #[case("3")]
    #[case("123")]
    #[case("-1")]
    fn test_duration_out_of_range(#[case] raw: &str) {
        let err = parse_month_duration(raw).unwrap_err();
        assert_eq!(err.to_string(), "Month duration must be 1 (month) or 12 (year).");
    }

    #[rstest]
    #[case("one")]
    #[case("1 month")]
    #[case("1.5")]
    #[case("")]
    fn test_duration_not_an_integer(#[case] raw: &str) {
        let err = parse_month_duration(raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Month duration must be a whole number (1 or 12)."
        );
    }

    #[rstest]
    #[case("0", dec!(0))]
    #[case("123", dec!(123))]
    #[case("123.45", dec!(123.45))]
    #[case("123.456", dec!(123.456))]
    fn test_amount_valid(#[case] raw: &str, #[case] expected: rust_decimal::Decimal) {
        assert_eq!(parse_amount("Gross income", raw).unwrap(), expected);
    }

    #[rstest]
    #[case("-1")]
    #[case("-123.45")]
    fn test_amount_negative(#[case] raw: &str) {
        let err = parse_amount("Gross income", raw).unwrap_err();
        assert_eq!(err.to_string(), "Gross income must be a non negative number.");
    }

    #[rstest]
    #[case("abc")]
    #[case("one hundred")]
    #[case("1 hundred")]
    #[case("")]
    fn test_amount_not_a_number(#[case] raw: &str) {
        let err = parse_amount("Total", raw).unwrap_err();
        assert_eq!(err.to_string(), "Total must be a valid number.");
    }
}
