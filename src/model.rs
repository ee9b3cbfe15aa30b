// Core structs: PriceBar, AnalysisResult, collaborator errors
use chrono::{DateTime, Utc};
use thiserror::Error;

/// One OHLCV candle. Series are always ordered oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Where the latest close sits relative to the moving-average band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    AboveBand,
    BelowBand,
    InsideBand,
}

impl Position {
    /// Band edges are inclusive: a close equal to either edge is inside.
    pub fn classify(close: f64, min_avg: f64, max_avg: f64) -> Self {
        if close > max_avg {
            Position::AboveBand
        } else if close < min_avg {
            Position::BelowBand
        } else {
            Position::InsideBand
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Position::AboveBand => "★ Bullish (above all MAs)",
            Position::BelowBand => "★ Bearish (below all MAs)",
            Position::InsideBand => "MAs entangled",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Position::AboveBand => "#28a745",
            Position::BelowBand => "#dc3545",
            Position::InsideBand => "#ffc107",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub latest_close: f64,
    pub spread_ratio: f64,
    pub threshold: f64,
    pub is_dense: bool,
    pub position: Position,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("exchange responded [{status}]: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid kline row: {0}")]
    InvalidRow(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("push api error: {0}")]
    Api(String),

    #[error("push endpoint unreachable")]
    Unreachable,
}
