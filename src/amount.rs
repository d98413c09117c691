/**
 * Money is kept as an exact decimal rather than a float, so totals over a
 * date range are exact and a value read back from the table is the value
 * that was written.
 *
 * Every `Amount` comes out of `FromStr`, which caps values below
 * 10^15. Sums of that many rows cannot leave the range `Decimal` holds
 * (about 7.9 * 10^28), so the arithmetic below never overflows.
 */
use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

const MAX_UNITS: i64 = 1_000_000_000_000_000;
const MAX_UNIT_DIGITS: usize = 15;
// Decimal's scale limit; no exponent past it can land below MAX_UNITS.
const MAX_EXPONENT: u32 = 28;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Rounded half away from zero to two decimals, for summaries.
    pub fn to_cents_string(self) -> String {
        let mut cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);
        if cents.is_zero() {
            cents.set_sign_positive(true);
        }
        cents.to_string()
    }

    /// Lossy, for plotting only.
    pub fn as_f64(self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    Empty,
    Negative,
    NotANumber,
    TooPrecise,
    Overflow,
}

impl Display for AmountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            AmountError::Empty => "no digits given",
            AmountError::Negative => "amount is negative",
            AmountError::NotANumber => "not a decimal number",
            AmountError::TooPrecise => "more than 28 digits past the decimal point",
            AmountError::Overflow => "amount is too large",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for AmountError {}

fn is_digits(digits: &str) -> bool {
    digits.bytes().all(|b| b.is_ascii_digit())
}

fn decimal_error(error: rust_decimal::Error) -> AmountError {
    match error {
        rust_decimal::Error::ExceedsMaximumPossibleValue => AmountError::Overflow,
        rust_decimal::Error::Underflow | rust_decimal::Error::ScaleExceedsMaximumPrecision(_) => {
            AmountError::TooPrecise
        }
        _ => AmountError::NotANumber,
    }
}

/**
 * Accepts `[+]digits[.digits][e[+-]digits]`, with digits allowed on either
 * side of the point. The exponent form is what Python writes for small
 * floats (`1e-05`), so older ledger files load too.
 */
impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let string = string.trim();
        if string.starts_with('-') {
            return Err(AmountError::Negative);
        }
        let string = string.strip_prefix('+').unwrap_or(string);

        let (mantissa, exponent) = match string.find(['e', 'E']) {
            Some(at) => (&string[..at], Some(&string[at + 1..])),
            None => (string, None),
        };
        let (units, decimals) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if units.is_empty() && decimals.is_empty() {
            return Err(AmountError::Empty);
        }
        if !is_digits(units) || !is_digits(decimals) {
            return Err(AmountError::NotANumber);
        }
        let units = if units.is_empty() { "0" } else { units };
        let mantissa = if decimals.is_empty() {
            units.to_string()
        } else {
            format!("{}.{}", units, decimals)
        };

        let value = match exponent {
            None => Decimal::from_str_exact(&mantissa).map_err(decimal_error)?,
            Some(exponent) => {
                let exponent = exponent.strip_prefix('+').unwrap_or(exponent);
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ("-", digits),
                    None => ("", exponent),
                };
                if digits.is_empty() || !is_digits(digits) {
                    return Err(AmountError::NotANumber);
                }
                // Digits left of the point once the exponent is applied.
                let integer_digits = |e: usize| match units.trim_start_matches('0').len() {
                    0 => e.saturating_sub(decimals.len() - decimals.trim_start_matches('0').len()),
                    n => n + e,
                };
                match digits.parse::<u32>() {
                    Ok(e) if e <= MAX_EXPONENT && sign == "-" => {}
                    Ok(e) if e <= MAX_EXPONENT
                        && integer_digits(e as usize) <= MAX_UNIT_DIGITS + 1 => {}
                    _ if sign == "-" => return Err(AmountError::TooPrecise),
                    _ => return Err(AmountError::Overflow),
                }
                Decimal::from_scientific(&format!("{}e{}{}", mantissa, sign, digits))
                    .map_err(decimal_error)?
            }
        };

        if value >= Decimal::from(MAX_UNITS) {
            return Err(AmountError::Overflow);
        }
        Ok(Amount(value))
    }
}

/**
 * Two decimals minimum, trailing zeros past that trimmed:
 * 12.5 -> "12.50", 1.2345 -> "1.2345", -60 -> "-60.00".
 */
impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut value = self.0.normalize();
        if value.scale() < 2 {
            value.rescale(2);
        }
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        write!(f, "{}", value)
    }
}

impl Add for Amount {
    type Output = Amount;
    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Amount;
    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}
