//! ExchangeRate-API client for fetching the latest rates
//!
//! `GET {base_url}/latest/{BASE}` returns an object whose `rates` field maps
//! currency codes to numbers. `base` and `date` are read when present.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::{ConvertError, RateTable};

const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com/v4";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Response body of `/latest/{BASE}`
#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    base: Option<String>,
    #[serde(default)]
    date: Option<String>,
    rates: serde_json::Map<String, serde_json::Value>,
}

/// ExchangeRate-API client
pub struct ExchangeRateApi {
    client: reqwest::Client,
    base_url: String,
}

impl ExchangeRateApi {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at another host; used by tests against a mock server
    pub(crate) fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(concat!("fxconverter/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch every rate expressed against `base`
    pub async fn fetch_latest(&self, base: &str) -> Result<RateTable, ConvertError> {
        let url = format!("{}/latest/{}", self.base_url, base);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ConvertError::Status(response.status().as_u16()));
        }

        let body: LatestResponse = response
            .json()
            .await
            .map_err(|e| ConvertError::Parse(e.to_string()))?;

        build_table(base, body)
    }
}

impl Default for ExchangeRateApi {
    fn default() -> Self {
        Self::new()
    }
}

fn build_table(requested_base: &str, body: LatestResponse) -> Result<RateTable, ConvertError> {
    let mut rates = Vec::with_capacity(body.rates.len());
    for (code, value) in body.rates {
        // Keep the code listed; converting through it reports the bad rate
        let rate = value.as_f64().unwrap_or_else(|| {
            tracing::warn!("Rate for {} is not a number: {}", code, value);
            f64::NAN
        });
        rates.push((code, rate));
    }

    let base = body.base.unwrap_or_else(|| requested_base.to_string());
    let mut table = RateTable::new(base, rates);
    if table.is_empty() {
        return Err(ConvertError::Parse("response contains no rates".to_string()));
    }

    if let Some(date) = body.date.as_deref() {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(as_of) => table = table.with_as_of(as_of),
            Err(e) => tracing::debug!("Ignoring unparseable rate date {:?}: {}", date, e),
        }
    }

    Ok(table)
}
