use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// On-chain token address as configured for a deployment.
///
/// Providers and configuration files disagree on letter case, so every
/// address carries its lowercased form for matching. The configured form is
/// what goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Address {
    raw: String,
    key: String,
}

impl Address {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim().to_owned();
        let key = raw.to_ascii_lowercase();
        Self { raw, key }
    }

    /// Address exactly as configured.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lowercased matching key.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn matches(&self, other: &str) -> bool {
        self.key == other.to_ascii_lowercase()
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.raw
    }
}
