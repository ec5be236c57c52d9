//! Per-(provider, chain) deployment configuration.
//!
//! Every deployment runs the same pipeline; only the values below differ.
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `chain_id` | Chain identifier substituted into `base_url` |
//! | `base_url` | Endpoint template, `{chain_id}` is replaced |
//! | `endpoint` | Where the address list goes (path segment or query parameter) |
//! | `auth` | Headers attached to the request |
//! | `response_shape` | Flat decimal or object with a price field |
//! | `currency` | Fixed currency query parameter, if the provider takes one |
//! | `alias` | Native → wrapped symbol rule |
//! | `tokens` | Symbol → address table |

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Credentials;
use crate::http_client::{HttpAuth, DEFAULT_TIMEOUT_MS};
use crate::table::{AddressTable, AliasRule};
use crate::ValidationError;

const ONEINCH_BASE_URL: &str = "https://api.1inch.dev/price/v1.1/{chain_id}";
const ARKEN_BASE_URL: &str = "https://public-api.arken.finance/insider/v1/{chain_id}/tokens/price";

const ETHEREUM_CHAIN_ID: u64 = 1;
const BSC_CHAIN_ID: u64 = 56;

const ETHEREUM_TOKENS: &[(&str, &str)] = &[
    ("WBTC", "0x2260fac5e5542a773aa44fbcfedf7c193bc2c599"),
    ("stETH", "0xae7ab96520de3a18e5e111b5eaab095312d7fe84"),
    ("wstETH", "0x7f39c581f595b53c5cb19bd0b3f8da6c935e2ca0"),
    ("WETH", "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
    ("XOR", "0x40fd72257597aa14c7231a7b1aaa29fce868f677"),
    ("RLB", "0x046eee2cc3188071c02bfc1745a6b17c656e3f3d"),
    ("VAL", "0xe88f8313e61a97cec1871ee37fbbe2a8bf3ed1e4"),
    ("PSWAP", "0x519c1001d550c0a1dae7d1fc220f7d14c2a521bb"),
    ("XST", "0xC60D6662027F5797Cf873bFe80BcF048e30Fc35e"),
    ("MUTE", "0xa49d7499271ae71cd8ab9ac515e6694c755d400c"),
    ("MTRG", "0xBd2949F67DcdC549c6Ebe98696449Fa79D988A9F"),
];

/// 1inch prices the native asset through its sentinel address.
const ETHEREUM_NATIVE: (&str, &str) = ("ETH", "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");

const BSC_TOKENS: &[(&str, &str)] = &[
    ("BETH", "0x250632378e573c6be1ac2f97fcdf00515d0aa91b"),
    ("PHB", "0x0409633A72D846fc5BBe2f98D88564D35987904D"),
];

const BSC_ONEINCH_ONLY: (&str, &str) = ("VC", "0x2bf83d080d8bc4715984e75e5b3d149805d11751");

/// Built-in deployment identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentId {
    OneinchEth,
    OneinchBsc,
    ArkenEth,
    ArkenBsc,
}

impl DeploymentId {
    pub const ALL: [Self; 4] = [
        Self::OneinchEth,
        Self::OneinchBsc,
        Self::ArkenEth,
        Self::ArkenBsc,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneinchEth => "oneinch-eth",
            Self::OneinchBsc => "oneinch-bsc",
            Self::ArkenEth => "arken-eth",
            Self::ArkenBsc => "arken-bsc",
        }
    }
}

impl Display for DeploymentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "oneinch-eth" => Ok(Self::OneinchEth),
            "oneinch-bsc" => Ok(Self::OneinchBsc),
            "arken-eth" => Ok(Self::ArkenEth),
            "arken-bsc" => Ok(Self::ArkenBsc),
            other => Err(ValidationError::InvalidDeployment {
                value: other.to_owned(),
            }),
        }
    }
}

/// How the comma-joined address list is attached to the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum EndpointStyle {
    /// `<base-url>/<addr1>,<addr2>`
    PathSegment,
    /// `<base-url>?<name>=<addr1>,<addr2>`
    QueryParameter { name: String },
}

/// Shape of each value in the provider's address-keyed body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseShape {
    /// `{"0xabc": "1.5"}`
    Flat,
    /// `{"0xabc": {"<name>": 1.5}}`
    Field { name: String },
}

/// Everything that distinguishes one (provider, chain) pair from another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub name: String,
    /// Provider label used in logs and error messages.
    pub provider: String,
    pub chain_id: u64,
    pub base_url: String,
    pub endpoint: EndpointStyle,
    #[serde(default = "default_auth")]
    pub auth: HttpAuth,
    pub response_shape: ResponseShape,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub alias: Option<AliasRule>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    pub tokens: AddressTable,
}

fn default_auth() -> HttpAuth {
    HttpAuth::None
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Deployment {
    /// Built-in deployment with credentials taken from `credentials`.
    pub fn builtin(id: DeploymentId, credentials: &Credentials) -> Result<Self, ValidationError> {
        let deployment = match id {
            DeploymentId::OneinchEth => {
                let tokens = ETHEREUM_TOKENS
                    .iter()
                    .copied()
                    .chain(std::iter::once(ETHEREUM_NATIVE));
                Self::oneinch(id, ETHEREUM_CHAIN_ID, AddressTable::new(tokens)?, credentials)
            }
            DeploymentId::OneinchBsc => {
                let tokens = BSC_TOKENS
                    .iter()
                    .copied()
                    .chain(std::iter::once(BSC_ONEINCH_ONLY));
                Self::oneinch(id, BSC_CHAIN_ID, AddressTable::new(tokens)?, credentials)
            }
            DeploymentId::ArkenEth => Self::arken(
                id,
                ETHEREUM_CHAIN_ID,
                AddressTable::new(ETHEREUM_TOKENS.iter().copied())?,
                credentials,
            ),
            DeploymentId::ArkenBsc => Self::arken(
                id,
                BSC_CHAIN_ID,
                AddressTable::new(BSC_TOKENS.iter().copied())?,
                credentials,
            ),
        };
        Ok(deployment)
    }

    fn oneinch(
        id: DeploymentId,
        chain_id: u64,
        tokens: AddressTable,
        credentials: &Credentials,
    ) -> Self {
        Self {
            name: id.as_str().to_owned(),
            provider: String::from("1inch"),
            chain_id,
            base_url: ONEINCH_BASE_URL.to_owned(),
            endpoint: EndpointStyle::PathSegment,
            auth: HttpAuth::BearerToken {
                token: credentials.oneinch_token.clone(),
            },
            response_shape: ResponseShape::Flat,
            currency: Some(String::from("USD")),
            alias: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            tokens,
        }
    }

    fn arken(
        id: DeploymentId,
        chain_id: u64,
        tokens: AddressTable,
        credentials: &Credentials,
    ) -> Self {
        Self {
            name: id.as_str().to_owned(),
            provider: String::from("arken"),
            chain_id,
            base_url: ARKEN_BASE_URL.to_owned(),
            endpoint: EndpointStyle::QueryParameter {
                name: String::from("addresses"),
            },
            auth: HttpAuth::Headers {
                headers: vec![
                    (
                        String::from("X-API-Username"),
                        credentials.arken_username.clone(),
                    ),
                    (String::from("X-API-Token"), credentials.arken_token.clone()),
                ],
            },
            response_shape: ResponseShape::Field {
                name: String::from("price"),
            },
            currency: None,
            alias: Some(AliasRule {
                native: "ETH".into(),
                wrapped: "WETH".into(),
            }),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            tokens,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Base URL with the chain id substituted and no trailing slash.
    pub fn endpoint_url(&self) -> String {
        self.base_url
            .replace("{chain_id}", &self.chain_id.to_string())
            .trim_end_matches('/')
            .to_owned()
    }

    /// Checks the invariants a hand-written deployment file can break.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::EmptyBaseUrl);
        }
        if let EndpointStyle::QueryParameter { name } = &self.endpoint {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyQueryParameter);
            }
        }
        if let ResponseShape::Field { name } = &self.response_shape {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyPriceField);
            }
        }
        if let Some(alias) = &self.alias {
            alias.validate()?;
        }
        Ok(())
    }
}
