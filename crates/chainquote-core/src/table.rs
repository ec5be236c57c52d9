//! Symbol → address tables and the native/wrapped alias rule.
//!
//! A table is fixed per deployment. Lookups by symbol are exact
//! (case-sensitive); lookups by address go through the lowercased key built
//! once when the table is constructed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Address, Symbol, ValidationError};

/// Treats a native asset as its wrapped token for lookup and back-fill.
///
/// The native symbol never appears in the table; it borrows the wrapped
/// token's address when building the query and copies the wrapped token's
/// slot when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRule {
    pub native: Symbol,
    pub wrapped: Symbol,
}

impl AliasRule {
    pub fn new(native: impl Into<Symbol>, wrapped: impl Into<Symbol>) -> Result<Self, ValidationError> {
        let native = native.into();
        let wrapped = wrapped.into();
        if native.is_empty() || wrapped.is_empty() {
            return Err(ValidationError::EmptyAliasSymbol);
        }
        if native == wrapped {
            return Err(ValidationError::SelfAlias {
                symbol: native.to_string(),
            });
        }
        Ok(Self { native, wrapped })
    }

    /// Symbol to use when looking `symbol` up in the table.
    pub fn lookup_symbol<'a>(&'a self, symbol: &'a Symbol) -> &'a Symbol {
        if *symbol == self.native {
            &self.wrapped
        } else {
            symbol
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        Self::new(self.native.clone(), self.wrapped.clone()).map(|_| ())
    }
}

/// Immutable symbol → address mapping for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct AddressTable {
    entries: Vec<(Symbol, Address)>,
    by_symbol: HashMap<Symbol, usize>,
    by_key: HashMap<String, Vec<usize>>,
}

impl AddressTable {
    /// Builds a table from `(symbol, address)` pairs in configuration order.
    /// A repeated symbol keeps its first position and takes the later address.
    pub fn new<I, S, A>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, A)>,
        S: Into<Symbol>,
        A: Into<Address>,
    {
        let mut ordered: Vec<(Symbol, Address)> = Vec::new();
        let mut by_symbol: HashMap<Symbol, usize> = HashMap::new();

        for (symbol, address) in entries {
            let symbol = symbol.into();
            let address = address.into();
            if symbol.is_empty() {
                return Err(ValidationError::EmptyTableSymbol);
            }
            if address.is_empty() {
                return Err(ValidationError::EmptyAddress {
                    symbol: symbol.to_string(),
                });
            }

            match by_symbol.get(&symbol) {
                Some(&index) => ordered[index].1 = address,
                None => {
                    by_symbol.insert(symbol.clone(), ordered.len());
                    ordered.push((symbol, address));
                }
            }
        }

        let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, (_, address)) in ordered.iter().enumerate() {
            by_key.entry(address.key().to_owned()).or_default().push(index);
        }

        Ok(Self {
            entries: ordered,
            by_symbol,
            by_key,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Address)> {
        self.entries.iter().map(|(symbol, address)| (symbol, address))
    }

    pub fn address_of(&self, symbol: &str) -> Option<&Address> {
        self.by_symbol
            .get(symbol)
            .map(|&index| &self.entries[index].1)
    }

    /// Address for a requested symbol after applying the alias rule.
    pub fn resolve(&self, symbol: &Symbol, alias: Option<&AliasRule>) -> Option<&Address> {
        let lookup = alias.map_or(symbol, |rule| rule.lookup_symbol(symbol));
        self.address_of(lookup.as_str())
    }

    /// Symbols configured for `address`, in table order. Matching ignores
    /// letter case.
    pub fn symbols_for(&self, address: &str) -> Vec<&Symbol> {
        self.by_key
            .get(&address.to_ascii_lowercase())
            .map(|indexes| indexes.iter().map(|&index| &self.entries[index].0).collect())
            .unwrap_or_default()
    }

    /// Unique addresses for the requested symbols, in first-request order.
    /// Symbols without an address are left out.
    pub fn build_query(&self, symbols: &[Symbol], alias: Option<&AliasRule>) -> PriceQuery {
        let mut query = PriceQuery::default();
        for symbol in symbols {
            if let Some(address) = self.resolve(symbol, alias) {
                query.push(address.clone());
            }
        }
        query
    }
}

impl TryFrom<Map<String, Value>> for AddressTable {
    type Error = ValidationError;

    fn try_from(value: Map<String, Value>) -> Result<Self, Self::Error> {
        let entries = value
            .into_iter()
            .map(|(symbol, address)| match address {
                Value::String(address) => Ok((symbol, address)),
                _ => Err(ValidationError::EmptyAddress { symbol }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }
}

impl From<AddressTable> for Map<String, Value> {
    fn from(value: AddressTable) -> Self {
        value
            .entries
            .into_iter()
            .map(|(symbol, address)| (String::from(symbol), Value::String(address.into())))
            .collect()
    }
}

/// Ordered set of unique addresses sent to the provider in one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceQuery {
    addresses: Vec<Address>,
}

impl PriceQuery {
    fn push(&mut self, address: Address) {
        if !self.addresses.iter().any(|known| known.key() == address.key()) {
            self.addresses.push(address);
        }
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Comma-joined addresses in their configured case.
    pub fn joined(&self) -> String {
        self.addresses
            .iter()
            .map(Address::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}
