//! Outbound price request: one GET per invocation for the whole query.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::deployment::{Deployment, EndpointStyle};
use crate::error::PriceError;
use crate::http_client::{HttpClient, HttpRequest};
use crate::table::PriceQuery;

/// Decoded provider body: address (as returned, any case) → raw value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPriceResponse {
    entries: Map<String, Value>,
}

impl RawPriceResponse {
    /// Decodes a body that must be a JSON object keyed by address.
    pub fn from_json(provider: &str, body: &str) -> Result<Self, PriceError> {
        let value: Value = serde_json::from_str(body).map_err(|error| {
            PriceError::decode(format!("failed to parse {provider} response: {error}"))
        })?;
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(PriceError::decode(format!(
                "{provider} response must be an object keyed by address, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(address, value)| (address.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for RawPriceResponse {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Issues the batched price request for a deployment.
#[derive(Clone)]
pub struct PriceFetcher {
    http_client: Arc<dyn HttpClient>,
}

impl PriceFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    /// Builds the request for `query` without sending it.
    pub fn request_for(deployment: &Deployment, query: &PriceQuery) -> HttpRequest {
        let addresses = query
            .addresses()
            .iter()
            .map(|address| urlencoding::encode(address.as_str()).into_owned())
            .collect::<Vec<_>>()
            .join(",");

        let base = deployment.endpoint_url();
        let url = match &deployment.endpoint {
            EndpointStyle::PathSegment => format!("{base}/{addresses}"),
            EndpointStyle::QueryParameter { name } => {
                let separator = if base.contains('?') { '&' } else { '?' };
                format!("{base}{separator}{}={addresses}", urlencoding::encode(name))
            }
        };

        let mut request = HttpRequest::get(url)
            .with_auth(&deployment.auth)
            .with_timeout_ms(deployment.timeout_ms);
        if let Some(currency) = &deployment.currency {
            request = request.with_query("currency", currency);
        }
        request
    }

    /// Sends exactly one request. Any transport failure or non-success
    /// status fails the whole invocation.
    pub async fn fetch(
        &self,
        deployment: &Deployment,
        query: &PriceQuery,
    ) -> Result<RawPriceResponse, PriceError> {
        let request = Self::request_for(deployment, query);
        debug!(
            provider = %deployment.provider,
            url = %request.url,
            auth_headers = ?deployment.auth.header_names(),
            addresses = query.len(),
            "requesting prices"
        );

        let response = self.http_client.execute(request).await.map_err(|error| {
            PriceError::transport(format!(
                "{} transport error: {}",
                deployment.provider,
                error.message()
            ))
        })?;

        if !response.is_success() {
            warn!(
                provider = %deployment.provider,
                status = response.status,
                "price request rejected"
            );
            return Err(PriceError::upstream_status(
                &deployment.provider,
                response.status,
            ));
        }

        let raw = RawPriceResponse::from_json(&deployment.provider, &response.body)?;
        debug!(provider = %deployment.provider, entries = raw.len(), "decoded price response");
        Ok(raw)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
