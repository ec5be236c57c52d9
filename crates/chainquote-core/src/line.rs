use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::{Price, PriceParseError, ValidationError};

/// Rendered placeholder for a symbol without a price.
pub const SENTINEL: &str = "-";

/// Ordered output of one invocation: one slot per requested symbol.
///
/// Renders as `price_1,price_2,...` with [`SENTINEL`] for empty slots. The
/// [`FromStr`] impl accepts the same format back and applies the checks a
/// consumer of the line relies on: each field is either the sentinel or a
/// non-negative decimal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceLine {
    slots: Vec<Option<Price>>,
}

impl PriceLine {
    pub fn new(slots: Vec<Option<Price>>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Option<Price>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots holding a price.
    pub fn resolved(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Parses a line that must answer exactly `expected` symbols.
    pub fn parse_expecting(value: &str, expected: usize) -> Result<Self, ValidationError> {
        let line: Self = value.parse()?;
        if line.len() != expected {
            return Err(ValidationError::MismatchedLength {
                expected,
                actual: line.len(),
            });
        }
        Ok(line)
    }

    /// Rendered fields, sentinel included.
    pub fn fields(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| match slot {
                Some(price) => price.to_decimal_string(),
                None => SENTINEL.to_owned(),
            })
            .collect()
    }
}

impl FromIterator<Option<Price>> for PriceLine {
    fn from_iter<T: IntoIterator<Item = Option<Price>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Display for PriceLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fields().join(","))
    }
}

impl FromStr for PriceLine {
    type Err = ValidationError;

    /// An empty line is the rendering of an empty request.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }

        value
            .split(',')
            .enumerate()
            .map(|(index, field)| {
                let field = field.trim();
                if field == SENTINEL {
                    return Ok(None);
                }
                Price::parse(field).map(Some).map_err(|error| match error {
                    PriceParseError::Negative(value) => {
                        ValidationError::NegativePrice { index, value }
                    }
                    PriceParseError::Malformed(value) => {
                        ValidationError::MalformedPrice { index, value }
                    }
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(value: &str) -> Option<Price> {
        Some(Price::parse(value).expect("valid price"))
    }

    #[test]
    fn renders_sentinels_in_place() {
        let line = PriceLine::new(vec![price("1.5"), None, price("2.000000000")]);
        assert_eq!(line.to_string(), "1.5,-,2");
        assert_eq!(line.len(), 3);
        assert_eq!(line.resolved(), 2);
    }

    #[test]
    fn parses_consumer_lines_with_spacing() {
        let line: PriceLine = "1.22, 1.32, -,1.44".parse().expect("valid line");
        assert_eq!(line.len(), 4);
        assert_eq!(line.slots()[2], None);
        assert_eq!(line.to_string(), "1.22,1.32,-,1.44");
    }

    #[test]
    fn rejects_negative_and_garbage_fields() {
        assert_eq!(
            "1.0,-0.555".parse::<PriceLine>(),
            Err(ValidationError::NegativePrice {
                index: 1,
                value: String::from("-0.555")
            })
        );
        assert!(matches!(
            "NO_DATA,ERROR".parse::<PriceLine>(),
            Err(ValidationError::MalformedPrice { index: 0, .. })
        ));
        assert!(matches!(
            "1,,2".parse::<PriceLine>(),
            Err(ValidationError::MalformedPrice { index: 1, .. })
        ));
    }

    #[test]
    fn expected_field_count_is_enforced() {
        assert_eq!(
            PriceLine::parse_expecting("1.5,-,2", 3).map(|line| line.len()),
            Ok(3)
        );
        assert_eq!(
            PriceLine::parse_expecting("1.5,-", 3),
            Err(ValidationError::MismatchedLength {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(PriceLine::parse_expecting("", 0), Ok(PriceLine::default()));
        assert!(matches!(
            PriceLine::parse_expecting("-1,2", 2),
            Err(ValidationError::NegativePrice { index: 0, .. })
        ));
    }

    #[test]
    fn empty_request_renders_and_parses_as_empty_line() {
        let line = PriceLine::default();
        assert_eq!(line.to_string(), "");
        assert_eq!("".parse::<PriceLine>(), Ok(PriceLine::default()));
    }
}
