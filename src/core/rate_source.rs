//! Rate source trait - anything that can produce a fresh rate table

use async_trait::async_trait;

use super::{ConvertError, RateTable};

/// A source of exchange rates expressed against a fixed base currency
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Base currency the returned tables are expressed against
    fn base(&self) -> &str;

    /// Fetch the latest full rate table
    async fn fetch_rates(&self) -> Result<RateTable, ConvertError>;
}
