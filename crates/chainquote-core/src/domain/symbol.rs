use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Ticker symbol as supplied by the caller.
///
/// Symbols are matched exactly as given: `stETH`, `STETH` and ` stETH` are
/// three different tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn new(input: &str) -> Self {
        Self(input.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_case_and_whitespace_as_given() {
        let symbol = Symbol::new("stETH");
        assert_ne!(symbol, Symbol::new("STETH"));
        assert_ne!(symbol, Symbol::new(" stETH"));
        assert_eq!(Symbol::new(" stETH ").as_str(), " stETH ");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let symbol: Symbol = serde_json::from_str("\"wstETH\"").expect("string symbol");
        assert_eq!(symbol.as_str(), "wstETH");
    }
}
