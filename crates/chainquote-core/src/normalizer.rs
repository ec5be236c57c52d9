//! Turns a raw provider body into symbol-keyed prices.
//!
//! Steps, in order:
//!
//! 1. match each returned address (case-insensitively) against the table,
//!    ignoring addresses the deployment does not know;
//! 2. extract the price according to the deployment's [`ResponseShape`];
//! 3. reject the whole response on the first negative or undecodable price;
//! 4. back-fill the native alias from its wrapped token.
//!
//! Symbols with no address or no returned price are simply absent from the
//! resulting [`PriceMap`]; the sentinel is only produced when rendering.

use std::collections::HashMap;

use serde_json::{Number, Value};
use tracing::warn;

use crate::deployment::{Deployment, ResponseShape};
use crate::error::PriceError;
use crate::fetcher::{json_kind, RawPriceResponse};
use crate::line::PriceLine;
use crate::table::{AddressTable, AliasRule};
use crate::{Price, PriceParseError, Symbol};

/// Resolved prices for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceMap {
    prices: HashMap<Symbol, Price>,
}

impl PriceMap {
    pub fn get(&self, symbol: &str) -> Option<&Price> {
        self.prices.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    fn insert(&mut self, symbol: Symbol, price: Price) {
        self.prices.insert(symbol, price);
    }

    /// One slot per requested symbol, in request order.
    pub fn render(&self, symbols: &[Symbol]) -> PriceLine {
        symbols
            .iter()
            .map(|symbol| self.get(symbol.as_str()).cloned())
            .collect()
    }
}

/// Price normalization parameterized by one deployment's table, response
/// shape and alias rule.
#[derive(Debug, Clone, Copy)]
pub struct PriceNormalizer<'a> {
    table: &'a AddressTable,
    shape: &'a ResponseShape,
    alias: Option<&'a AliasRule>,
}

impl<'a> PriceNormalizer<'a> {
    pub fn new(
        table: &'a AddressTable,
        shape: &'a ResponseShape,
        alias: Option<&'a AliasRule>,
    ) -> Self {
        Self {
            table,
            shape,
            alias,
        }
    }

    pub fn for_deployment(deployment: &'a Deployment) -> Self {
        Self::new(
            &deployment.tokens,
            &deployment.response_shape,
            deployment.alias.as_ref(),
        )
    }

    pub fn normalize(
        &self,
        raw: &RawPriceResponse,
        requested: &[Symbol],
    ) -> Result<PriceMap, PriceError> {
        let mut prices = PriceMap::default();

        for (address, value) in raw.iter() {
            let symbols = self.table.symbols_for(address);
            let Some(first) = symbols.first() else {
                continue;
            };

            let price = self.extract(address, value)?.map_err(|error| match error {
                PriceParseError::Negative(value) => {
                    warn!(symbol = %first, %address, %value, "negative price in response");
                    PriceError::negative_price(first.as_str(), &value)
                }
                PriceParseError::Malformed(value) => {
                    warn!(symbol = %first, %address, %value, "unparseable price in response");
                    PriceError::decode(format!(
                        "price for '{first}' is not a decimal number: '{value}'"
                    ))
                }
            })?;

            for symbol in symbols {
                prices.insert(symbol.clone(), price.clone());
            }
        }

        if let Some(rule) = self.alias {
            if requested.contains(&rule.native) {
                let wrapped = prices.get(rule.wrapped.as_str()).cloned();
                match wrapped {
                    Some(price) => prices.insert(rule.native.clone(), price),
                    None => {
                        prices.prices.remove(rule.native.as_str());
                    }
                }
            }
        }

        Ok(prices)
    }

    /// Price for one known address. Strings and JSON numbers are accepted;
    /// anything else means the provider contract changed. The inner result
    /// carries the parse outcome so the caller can classify it.
    fn extract(
        &self,
        address: &str,
        value: &Value,
    ) -> Result<Result<Price, PriceParseError>, PriceError> {
        let inner = match self.shape {
            ResponseShape::Flat => value,
            ResponseShape::Field { name } => value.get(name.as_str()).ok_or_else(|| {
                PriceError::decode(format!(
                    "price entry for {address} has no '{name}' field (got {})",
                    json_kind(value)
                ))
            })?,
        };

        match inner {
            Value::String(text) => Ok(Price::parse(text)),
            Value::Number(number) => Ok(number_price(number)),
            other => Err(PriceError::decode(format!(
                "price for {address} must be a string or number, got {}",
                json_kind(other)
            ))),
        }
    }
}

/// Integers are exact; fractions go through the `f64` they were decoded as.
fn number_price(number: &Number) -> Result<Price, PriceParseError> {
    match number.as_f64() {
        Some(value) if number.is_f64() => Price::from_f64(value),
        _ => Price::parse(&number.to_string()),
    }
}
