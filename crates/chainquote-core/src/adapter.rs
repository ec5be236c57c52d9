//! Entry point tying the table, fetcher and normalizer together.

use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::deployment::Deployment;
use crate::error::PriceError;
use crate::fetcher::{PriceFetcher, RawPriceResponse};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::line::PriceLine;
use crate::normalizer::PriceNormalizer;
use crate::Symbol;

/// Price adapter for a single deployment.
///
/// Each call to [`prices`](PriceAdapter::prices) is one independent
/// fetch-and-format pass; nothing is kept between calls.
#[derive(Clone)]
pub struct PriceAdapter {
    deployment: Deployment,
    fetcher: PriceFetcher,
}

impl PriceAdapter {
    pub fn new(deployment: Deployment, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            deployment,
            fetcher: PriceFetcher::new(http_client),
        }
    }

    /// Adapter backed by the production reqwest transport.
    pub fn with_reqwest(deployment: Deployment) -> Self {
        Self::new(deployment, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Prices for `symbols`, one slot per symbol in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] when the request fails, the provider answers
    /// with a non-success status or an undecodable body, or any known
    /// address carries a negative price. No partial line is produced.
    pub async fn prices(&self, symbols: &[Symbol]) -> Result<PriceLine, PriceError> {
        let span = info_span!(
            "prices",
            request_id = %Uuid::new_v4(),
            deployment = %self.deployment.name,
            chain_id = self.deployment.chain_id,
        );
        self.resolve(symbols).instrument(span).await
    }

    /// Sends at most one request. When no requested symbol has an address
    /// the provider is not contacted and every slot is the sentinel.
    async fn resolve(&self, symbols: &[Symbol]) -> Result<PriceLine, PriceError> {
        let deployment = &self.deployment;
        let query = deployment
            .tokens
            .build_query(symbols, deployment.alias.as_ref());

        let raw = if query.is_empty() {
            debug!(requested = symbols.len(), "no requested symbol has an address; skipping request");
            RawPriceResponse::default()
        } else {
            self.fetcher.fetch(deployment, &query).await?
        };

        let prices = PriceNormalizer::for_deployment(deployment).normalize(&raw, symbols)?;
        let line = prices.render(symbols);

        info!(
            requested = symbols.len(),
            queried = query.len(),
            resolved = line.resolved(),
            "prices resolved"
        );
        Ok(line)
    }
}
