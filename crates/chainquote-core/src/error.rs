use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

/// Validation and contract errors exposed by `chainquote-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("token table symbol cannot be empty")]
    EmptyTableSymbol,
    #[error("address for symbol '{symbol}' cannot be empty")]
    EmptyAddress { symbol: String },

    #[error("alias symbol cannot be empty")]
    EmptyAliasSymbol,
    #[error("alias '{symbol}' cannot point at itself")]
    SelfAlias { symbol: String },

    #[error("endpoint query parameter name cannot be empty")]
    EmptyQueryParameter,
    #[error("response price field name cannot be empty")]
    EmptyPriceField,
    #[error("base url cannot be empty")]
    EmptyBaseUrl,

    #[error(
        "invalid deployment '{value}', expected one of oneinch-eth, oneinch-bsc, arken-eth, arken-bsc"
    )]
    InvalidDeployment { value: String },

    #[error("price field {index} is not a decimal: '{value}'")]
    MalformedPrice { index: usize, value: String },
    #[error("price field {index} is negative: '{value}'")]
    NegativePrice { index: usize, value: String },
    #[error("price line has {actual} fields, expected {expected}")]
    MismatchedLength { expected: usize, actual: usize },
}

/// Failures while loading a deployment configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Price pipeline error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceErrorKind {
    /// The outbound request could not be completed.
    Transport,
    /// The provider answered with a non-success status.
    UpstreamStatus,
    /// The provider body (or a price inside it) could not be decoded.
    Decode,
    /// A decoded price violates the non-negative invariant.
    Validation,
}

/// Fatal error for a whole price invocation. There is no per-symbol
/// failure: either every requested symbol gets a slot or nothing is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceError {
    kind: PriceErrorKind,
    message: String,
}

impl PriceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: PriceErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn upstream_status(provider: &str, status: u16) -> Self {
        Self {
            kind: PriceErrorKind::UpstreamStatus,
            message: format!("{provider} upstream returned status {status}"),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: PriceErrorKind::Decode,
            message: message.into(),
        }
    }

    pub fn negative_price(symbol: &str, value: &str) -> Self {
        Self {
            kind: PriceErrorKind::Validation,
            message: format!("negative price returned for '{symbol}': {value}"),
        }
    }

    pub const fn kind(&self) -> PriceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            PriceErrorKind::Transport => "price.transport",
            PriceErrorKind::UpstreamStatus => "price.upstream_status",
            PriceErrorKind::Decode => "price.decode",
            PriceErrorKind::Validation => "price.validation",
        }
    }
}

impl Display for PriceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for PriceError {}
