//! ExchangeRate-API provider
//!
//! Fetches the full table of rates against a fixed base currency from the
//! public ExchangeRate-API endpoint. No key is required.

mod api;

use async_trait::async_trait;

use crate::core::{ConvertError, RateSource, RateTable};

pub use api::ExchangeRateApi;

/// Base currency every fetched rate is expressed against
pub const BASE_CURRENCY: &str = "USD";

/// Rate source backed by ExchangeRate-API
pub struct ExchangeRateProvider {
    base: String,
    api: ExchangeRateApi,
}

impl ExchangeRateProvider {
    pub fn new() -> Self {
        Self {
            base: BASE_CURRENCY.to_string(),
            api: ExchangeRateApi::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_api(base: &str, api: ExchangeRateApi) -> Self {
        Self {
            base: base.to_string(),
            api,
        }
    }
}

impl Default for ExchangeRateProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateSource for ExchangeRateProvider {
    fn base(&self) -> &str {
        &self.base
    }

    async fn fetch_rates(&self) -> Result<RateTable, ConvertError> {
        tracing::debug!("Fetching rates against {}", self.base);

        let table = self.api.fetch_latest(&self.base).await?;
        tracing::info!(
            "Fetched {} rates against {} (as of {})",
            table.len(),
            table.base,
            table
                .as_of
                .map(|d| d.to_string())
                .unwrap_or_else(|| "unknown date".to_string())
        );

        Ok(table)
    }
}
