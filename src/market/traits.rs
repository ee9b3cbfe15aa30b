use crate::model::{FetchError, PriceBar};

/// Source of OHLCV history. Bars come back oldest first; an empty Vec means
/// "no data" and is not an error.
#[async_trait::async_trait]
pub trait MarketData: Send + Sync {
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<PriceBar>, FetchError>;
}
