use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, RoundingMode, Zero};
use thiserror::Error;

/// Number of fractional digits kept when rendering a price.
pub const PRICE_SCALE: i64 = 9;

/// Why a textual price could not become a [`Price`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    #[error("'{0}' is not a decimal number")]
    Malformed(String),
    #[error("'{0}' is negative")]
    Negative(String),
}

/// Non-negative USD price with exact decimal precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price(BigDecimal);

impl Price {
    /// Parses a provider decimal (`"1.5"`, `"2.000000000"`, `"1e-7"`).
    pub fn parse(input: &str) -> Result<Self, PriceParseError> {
        let trimmed = input.trim();
        let value = BigDecimal::from_str(trimmed)
            .map_err(|_| PriceParseError::Malformed(trimmed.to_owned()))?;
        if value < BigDecimal::zero() {
            return Err(PriceParseError::Negative(trimmed.to_owned()));
        }
        Ok(Self(value))
    }

    /// Exact decimal value of a binary float, digit for digit, not its
    /// shortest text form.
    pub fn from_f64(value: f64) -> Result<Self, PriceParseError> {
        if !value.is_finite() {
            return Err(PriceParseError::Malformed(value.to_string()));
        }
        if value < 0.0 {
            return Err(PriceParseError::Negative(value.to_string()));
        }

        let bits = value.to_bits();
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & ((1_u64 << 52) - 1);
        let (mantissa, exponent) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1_u64 << 52), biased - 1075)
        };

        let mantissa = BigInt::from(mantissa);
        let exact = if exponent >= 0 {
            let shift = usize::try_from(exponent)
                .map_err(|_| PriceParseError::Malformed(value.to_string()))?;
            BigDecimal::from(mantissa << shift)
        } else {
            // m * 2^-k == m * 5^k / 10^k
            let scale = -exponent;
            let power = u32::try_from(scale)
                .map_err(|_| PriceParseError::Malformed(value.to_string()))?;
            BigDecimal::new(mantissa * BigInt::from(5_u8).pow(power), scale)
        };
        Ok(Self(exact))
    }

    pub fn value(&self) -> &BigDecimal {
        &self.0
    }

    /// Fixed point with [`PRICE_SCALE`] digits (half-even), then trailing
    /// zeros and a dangling decimal point removed.
    pub fn to_decimal_string(&self) -> String {
        let rounded = self.0.with_scale_round(PRICE_SCALE, RoundingMode::HalfEven);
        let (digits, scale) = rounded.as_bigint_and_exponent();
        let scale = usize::try_from(scale).unwrap_or(0);
        let digits = digits.to_string();
        if scale == 0 {
            return digits;
        }

        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (integer, fraction) = padded.split_at(padded.len() - scale);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            integer.to_owned()
        } else {
            format!("{integer}.{fraction}")
        }
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl FromStr for Price {
    type Err = PriceParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(input: &str) -> String {
        Price::parse(input).expect("valid price").to_decimal_string()
    }

    #[test]
    fn strips_trailing_zeros_and_dot() {
        assert_eq!(render("1.500000000"), "1.5");
        assert_eq!(render("1.230000000"), "1.23");
        assert_eq!(render("5.000000000"), "5");
        assert_eq!(render("2"), "2");
        assert_eq!(render("10.000000000"), "10");
    }

    #[test]
    fn keeps_nine_fractional_digits() {
        assert_eq!(render("0.000000001"), "0.000000001");
        assert_eq!(render("64123.123456789"), "64123.123456789");
    }

    #[test]
    fn rounds_half_to_even_at_the_ninth_digit() {
        assert_eq!(render("0.0000000005"), "0");
        assert_eq!(render("0.0000000015"), "0.000000002");
        assert_eq!(render("1.1234567891"), "1.123456789");
        assert_eq!(render("0.99999999999"), "1");
    }

    #[test]
    fn accepts_exponent_notation() {
        assert_eq!(render("1e-7"), "0.0000001");
        assert_eq!(render("1e-10"), "0");
        assert_eq!(render("2.5E3"), "2500");
    }

    #[test]
    fn floats_round_from_their_exact_binary_value() {
        let render_f64 = |value: f64| {
            Price::from_f64(value)
                .expect("valid float")
                .to_decimal_string()
        };
        assert_eq!(render_f64(0.1234567895), "0.123456789");
        assert_eq!(render_f64(1.0000000005), "1.000000001");
        assert_eq!(render_f64(2.0000000025), "2.000000003");
        assert_eq!(render_f64(0.5), "0.5");
        assert_eq!(render_f64(3120.5), "3120.5");
        assert_eq!(render_f64(1e300).len(), 301);
        assert_eq!(render_f64(0.0), "0");
        assert!(matches!(
            Price::from_f64(-0.25),
            Err(PriceParseError::Negative(_))
        ));
    }

    #[test]
    fn zero_is_a_valid_price() {
        assert_eq!(render("0"), "0");
        assert_eq!(render("0.000000000"), "0");
    }

    #[test]
    fn rejects_negative_and_malformed_values() {
        assert_eq!(
            Price::parse("-0.555"),
            Err(PriceParseError::Negative(String::from("-0.555")))
        );
        assert_eq!(
            Price::parse("-0.0000000001"),
            Err(PriceParseError::Negative(String::from("-0.0000000001")))
        );
        assert!(matches!(
            Price::parse("abc"),
            Err(PriceParseError::Malformed(_))
        ));
        assert!(matches!(Price::parse(""), Err(PriceParseError::Malformed(_))));
        assert!(matches!(
            Price::parse("NaN"),
            Err(PriceParseError::Malformed(_))
        ));
    }
}
