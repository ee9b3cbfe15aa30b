use crate::market::traits::MarketData;
use crate::model::{FetchError, PriceBar};

use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Binance caps a single klines request at this many rows.
pub const MAX_KLINES: usize = 1000;

pub struct BinanceFetcher {
    client: Client,
    base_url: String,
}

impl BinanceFetcher {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("ma-density-sniper/0.1")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self) -> String {
        format!("{}/api/v3/klines", self.base_url)
    }
}

/// "BTC/USDT" -> "BTCUSDT"
pub fn exchange_symbol(symbol: &str) -> String {
    symbol.replace('/', "").to_uppercase()
}

fn number_at(row: &[Value], idx: usize) -> Result<f64, FetchError> {
    let value = row
        .get(idx)
        .ok_or_else(|| FetchError::InvalidRow(format!("missing column {}", idx)))?;
    match value {
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|e| FetchError::InvalidRow(format!("column {}: {}", idx, e))),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| FetchError::InvalidRow(format!("column {} out of range", idx))),
        other => Err(FetchError::InvalidRow(format!("column {}: unexpected {}", idx, other))),
    }
}

/// Decodes Binance kline rows `[open_time, open, high, low, close, volume, ...]`.
pub fn parse_klines(body: &str) -> Result<Vec<PriceBar>, FetchError> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(body)?;
    rows.iter()
        .map(|row| {
            let open_time = row
                .first()
                .and_then(Value::as_i64)
                .ok_or_else(|| FetchError::InvalidRow("missing open time".into()))?;
            let timestamp = Utc
                .timestamp_millis_opt(open_time)
                .single()
                .ok_or_else(|| FetchError::InvalidRow(format!("bad open time {}", open_time)))?;

            Ok(PriceBar {
                timestamp,
                open: number_at(row, 1)?,
                high: number_at(row, 2)?,
                low: number_at(row, 3)?,
                close: number_at(row, 4)?,
                volume: number_at(row, 5)?,
            })
        })
        .collect()
}

#[async_trait::async_trait]
impl MarketData for BinanceFetcher {
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<PriceBar>, FetchError> {
        let limit = limit.clamp(1, MAX_KLINES);
        let response = self
            .client
            .get(self.build_url())
            .query(&[
                ("symbol", exchange_symbol(symbol)),
                ("interval", timeframe.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body });
        }

        let bars = parse_klines(&body)?;
        debug!(symbol, timeframe, bars = bars.len(), "klines fetched");
        Ok(bars)
    }
}
