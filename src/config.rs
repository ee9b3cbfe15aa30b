use crate::analyzer::threshold::DEFAULT_THRESHOLD;
use crate::market::fetcher::MAX_KLINES;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

pub const TOKEN_ENV: &str = "PUSHPLUS_TOKEN";
pub const CONFIG_PATH_ENV: &str = "DENSITY_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub symbols: Vec<String>,
    pub timeframes: Vec<String>,
    /// Moving-average periods; each yields one simple and one exponential mean.
    pub periods: Vec<usize>,
    /// Max spread ratio per timeframe (0.006 == 0.6%).
    pub thresholds: HashMap<String, f64>,
    pub default_threshold: f64,
    /// Bars requested per pair, at most the exchange cap. EMA seeding depends on it,
    /// so keep it well above the longest period.
    pub lookback_bars: usize,
    pub request_delay_ms: u64,
    pub exchange_base_url: String,
    pub pushplus_token: Option<String>,
    /// None means one scan per process invocation.
    pub scan_interval_seconds: Option<u64>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let thresholds = [
            ("5m", 0.006),
            ("15m", 0.008),
            ("1h", 0.012),
            ("4h", 0.015),
            ("1d", 0.030),
            ("1w", 0.050),
        ]
        .into_iter()
        .map(|(tf, t)| (tf.to_string(), t))
        .collect();

        Self {
            symbols: ["BTC/USDT", "ETH/USDT", "SOL/USDT"].map(String::from).to_vec(),
            timeframes: ["5m", "15m", "1h", "4h", "1d", "1w"].map(String::from).to_vec(),
            periods: vec![20, 60, 120],
            thresholds,
            default_threshold: DEFAULT_THRESHOLD,
            lookback_bars: 500,
            request_delay_ms: 100,
            exchange_base_url: "https://api.binance.com".to_string(),
            pushplus_token: None,
            scan_interval_seconds: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn max_period(&self) -> usize {
        self.periods.iter().copied().max().unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::Invalid("symbols must not be empty".into()));
        }
        if self.timeframes.is_empty() {
            return Err(ConfigError::Invalid("timeframes must not be empty".into()));
        }
        if self.periods.is_empty() || self.periods.contains(&0) {
            return Err(ConfigError::Invalid("periods must be non-empty and positive".into()));
        }
        if let Some((tf, t)) = self.thresholds.iter().find(|(_, t)| !(**t > 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "threshold for {} must be positive, got {}",
                tf, t
            )));
        }
        if !(self.default_threshold > 0.0) {
            return Err(ConfigError::Invalid("default_threshold must be positive".into()));
        }
        if self.lookback_bars < self.max_period() {
            return Err(ConfigError::Invalid(format!(
                "lookback_bars ({}) is shorter than the longest period ({})",
                self.lookback_bars,
                self.max_period()
            )));
        }
        if self.lookback_bars > MAX_KLINES {
            return Err(ConfigError::Invalid(format!(
                "lookback_bars ({}) exceeds the exchange limit of {} bars per request",
                self.lookback_bars, MAX_KLINES
            )));
        }
        if self.scan_interval_seconds == Some(0) {
            return Err(ConfigError::Invalid("scan_interval_seconds must be positive".into()));
        }
        Ok(())
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Loads the JSON config at `path`, falling back to built-in defaults when the file is absent.
/// A non-empty `PUSHPLUS_TOKEN` env var always wins over the file.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let mut config = if Path::new(path).exists() {
        info!("📄 Loading config from {}", path);
        parse_config(&fs::read_to_string(path)?)?
    } else {
        warn!("⚠️ Config file {} not found, using defaults", path);
        let config = AppConfig::default();
        config.validate()?;
        config
    };

    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.trim().is_empty() {
            config.pushplus_token = Some(token);
        }
    }

    Ok(config)
}
