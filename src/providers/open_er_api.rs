use crate::core::{CurrencyCode, ExchangeQuote, ExchangeRateProvider};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Latest rates from the open.er-api.com endpoint, `GET {base_url}/{FROM}`.
pub struct OpenErApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OpenErApiProvider {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("fxconv/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(OpenErApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    time_last_update_utc: Option<String>,
    rates: Option<HashMap<String, f64>>,
}

#[async_trait]
impl ExchangeRateProvider for OpenErApiProvider {
    #[instrument(
        name = "OpenErApiFetch",
        skip(self),
        fields(from = %from, to = %to)
    )]
    async fn latest_quote(&self, from: CurrencyCode, to: CurrencyCode) -> Result<ExchangeQuote> {
        let url = format!("{}/{}", self.base_url, from);
        debug!("Requesting latest rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, from))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                from
            ));
        }

        let text = response.text().await?;

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", from, e))?;

        match data.result.as_deref() {
            None | Some("success") => {}
            Some(_) => {
                return Err(anyhow!(
                    "Provider error for base currency {}: {}",
                    from,
                    data.error_type.as_deref().unwrap_or("unknown")
                ));
            }
        }

        let rates = data
            .rates
            .ok_or_else(|| anyhow!("No rates in response for base currency: {}", from))?;

        let rate = rates
            .get(to.code())
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or_else(|| anyhow!("No rate found for currency pair: {}/{}", from, to))?;

        let as_of = data
            .time_last_update_utc
            .ok_or_else(|| anyhow!("No update time in response for base currency: {}", from))?;

        Ok(ExchangeQuote { rate, as_of })
    }
}
