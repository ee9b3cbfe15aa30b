use crate::analyzer::DensityAnalyzer;
use crate::config::AppConfig;
use crate::market::MarketData;
use crate::model::PriceBar;
use crate::notifier::message::{ALERT_TITLE, compose_report, format_signal_line};
use crate::notifier::{Delivery, Notifier};
use chrono::Local;
use std::sync::Arc;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    FetchFailed(String),
    NoData,
    InsufficientHistory { got: usize, need: usize },
}

#[derive(Debug)]
pub enum FetchOutcome {
    Bars(Vec<PriceBar>),
    Skip(SkipReason),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanReport {
    pub pairs_scanned: usize,
    pub signals: usize,
    pub skipped: usize,
    /// Notifier was invoked; delivery itself may still have been skipped or failed.
    pub notified: bool,
}

/// One full pass over symbols x timeframes. Holds no state between scans.
pub struct Scanner {
    config: Arc<AppConfig>,
    analyzer: DensityAnalyzer,
    market: Arc<dyn MarketData>,
    notifier: Arc<dyn Notifier>,
}

impl Scanner {
    pub fn new(
        config: Arc<AppConfig>,
        market: Arc<dyn MarketData>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let analyzer = DensityAnalyzer::from_config(&config);
        Self { config, analyzer, market, notifier }
    }

    async fn fetch(&self, symbol: &str, timeframe: &str) -> FetchOutcome {
        let bars = match self
            .market
            .fetch_ohlcv(symbol, timeframe, self.config.lookback_bars)
            .await
        {
            Ok(bars) => bars,
            Err(e) => return FetchOutcome::Skip(SkipReason::FetchFailed(e.to_string())),
        };

        let need = self.analyzer.min_bars();
        if bars.is_empty() {
            FetchOutcome::Skip(SkipReason::NoData)
        } else if bars.len() < need {
            FetchOutcome::Skip(SkipReason::InsufficientHistory { got: bars.len(), need })
        } else {
            FetchOutcome::Bars(bars)
        }
    }

    pub async fn run_scan(&self) -> ScanReport {
        info!("🔎 Starting scan...");
        let mut report = ScanReport::default();
        let mut lines = Vec::new();
        let delay = Duration::from_millis(self.config.request_delay_ms);

        for symbol in &self.config.symbols {
            for timeframe in &self.config.timeframes {
                report.pairs_scanned += 1;

                match self.fetch(symbol, timeframe).await {
                    FetchOutcome::Bars(bars) => match self.analyzer.analyze(&bars, timeframe) {
                        Some(res) if res.is_dense => {
                            info!(
                                "🎯 Signal: {} {} spread {:.2}% ≤ {:.1}%",
                                symbol,
                                timeframe,
                                res.spread_ratio * 100.0,
                                res.threshold * 100.0
                            );
                            lines.push(format_signal_line(symbol, timeframe, &res));
                        }
                        Some(res) => {
                            debug!(
                                "{} {} spread {:.2}% above {:.1}%",
                                symbol,
                                timeframe,
                                res.spread_ratio * 100.0,
                                res.threshold * 100.0
                            );
                        }
                        None => {
                            debug!("{} {}: averages undefined, skipping", symbol, timeframe);
                            report.skipped += 1;
                        }
                    },
                    FetchOutcome::Skip(SkipReason::FetchFailed(e)) => {
                        warn!("⚠️ Fetch {} {} failed: {}", symbol, timeframe, e);
                        report.skipped += 1;
                    }
                    FetchOutcome::Skip(reason) => {
                        debug!("{} {} skipped: {:?}", symbol, timeframe, reason);
                        report.skipped += 1;
                    }
                }

                if !delay.is_zero() {
                    sleep(delay).await;
                }
            }
        }

        report.signals = lines.len();
        if lines.is_empty() {
            info!("😴 No density signals this scan, staying quiet.");
        } else {
            let content = compose_report(&lines, Local::now());
            match self.notifier.send(ALERT_TITLE, &content).await {
                Ok(Delivery::Sent) => info!("✅ Push sent with {} signal(s)", lines.len()),
                Ok(Delivery::Skipped) => info!(
                    "🔕 Push not delivered (no token), {} signal(s) only logged",
                    lines.len()
                ),
                Err(e) => warn!("❌ Push failed: {}", e),
            }
            report.notified = true;
        }

        info!(
            "🏁 Scan finished: {} pairs, {} signals, {} skipped",
            report.pairs_scanned, report.signals, report.skipped
        );
        report
    }
}
