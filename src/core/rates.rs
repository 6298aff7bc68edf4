//! Exchange rate provider abstraction

use super::currency::CurrencyCode;
use super::quote::ExchangeQuote;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Fetches the latest rates for base `from` and picks out `to`.
    async fn latest_quote(&self, from: CurrencyCode, to: CurrencyCode) -> Result<ExchangeQuote>;
}
