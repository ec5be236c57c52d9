//! # Chainquote Core
//!
//! Token price adapter for on-chain price aggregators.
//!
//! ## Overview
//!
//! Given an ordered list of token symbols, the crate resolves each symbol to
//! a contract address through a per-deployment table, fetches USD prices for
//! all resolvable addresses in a single request, and renders one
//! comma-separated line with one field per requested symbol:
//!
//! ```text
//! 1.5,-,2
//! ```
//!
//! Missing data is rendered as [`SENTINEL`] (`-`). Any transport failure,
//! non-success status, undecodable body, or negative price fails the whole
//! invocation; partial lines are never produced.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapter`] | End-to-end price adapter for one deployment |
//! | [`config`] | Credentials and deployment file loading |
//! | [`deployment`] | Built-in deployments and their provider settings |
//! | [`domain`] | Symbol, address and price value types |
//! | [`error`] | Core error types |
//! | [`fetcher`] | Batched outbound price request |
//! | [`http_client`] | HTTP client abstraction |
//! | [`line`] | Rendered output line |
//! | [`normalizer`] | Response matching, validation and aliasing |
//! | [`table`] | Symbol to address table and query building |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chainquote_core::{config, Credentials, DeploymentId, DeploymentSource, PriceAdapter, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let deployment = config::resolve(
//!         DeploymentSource::Builtin(DeploymentId::OneinchEth),
//!         &Credentials::from_env(),
//!     )?;
//!     let adapter = PriceAdapter::with_reqwest(deployment);
//!
//!     let symbols = [Symbol::new("WBTC"), Symbol::new("DOGE"), Symbol::new("ETH")];
//!     println!("{}", adapter.prices(&symbols).await?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Caller   │
//! └────────┬────────┘
//!          │ symbols
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  PriceAdapter   │────▶│  AddressTable    │
//! └────────┬────────┘     │  (PriceQuery)    │
//!          │              └──────────────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  PriceFetcher   │────▶│ HTTP Client      │
//! └────────┬────────┘     │ (reqwest)        │
//!          │              └──────────────────┘
//!          ▼
//! ┌─────────────────┐
//! │ PriceNormalizer │──▶ PriceLine
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use chainquote_core::{PriceError, PriceErrorKind};
//!
//! fn handle_error(error: PriceError) {
//!     match error.kind() {
//!         PriceErrorKind::Transport | PriceErrorKind::UpstreamStatus => {
//!             // Provider unreachable or refused the request
//!         }
//!         PriceErrorKind::Decode => {
//!             // Provider contract changed
//!         }
//!         PriceErrorKind::Validation => {
//!             // Provider returned a negative price
//!         }
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - Credentials are read from environment variables or a deployment file
//!   and are never logged; only header names are
//! - Provider endpoints are HTTPS; TLS comes from reqwest's default backend

pub mod adapter;
pub mod config;
pub mod deployment;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod line;
pub mod normalizer;
pub mod table;

// Adapter
pub use adapter::PriceAdapter;

// Configuration
pub use config::{Credentials, DeploymentSource};

// Deployments
pub use deployment::{Deployment, DeploymentId, EndpointStyle, ResponseShape};

// Domain types
pub use domain::{Address, Price, PriceParseError, Symbol, PRICE_SCALE};

// Error types
pub use error::{ConfigError, PriceError, PriceErrorKind, ValidationError};

// Fetching and normalization
pub use fetcher::{PriceFetcher, RawPriceResponse};
pub use normalizer::{PriceMap, PriceNormalizer};

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
    DEFAULT_TIMEOUT_MS,
};

// Output
pub use line::{PriceLine, SENTINEL};

// Address table
pub use table::{AddressTable, AliasRule, PriceQuery};
