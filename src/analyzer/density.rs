use crate::analyzer::moving_average::{ema_unadjusted, sma};
use crate::analyzer::threshold::ThresholdTable;
use crate::config::AppConfig;
use crate::model::{AnalysisResult, Position, PriceBar};

/// Detects moving-average convergence ("density") on a close series.
#[derive(Debug, Clone)]
pub struct DensityAnalyzer {
    periods: Vec<usize>,
    thresholds: ThresholdTable,
}

impl DensityAnalyzer {
    pub fn new(periods: Vec<usize>, thresholds: ThresholdTable) -> Self {
        Self { periods, thresholds }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(
            cfg.periods.clone(),
            ThresholdTable::new(cfg.thresholds.clone(), cfg.default_threshold),
        )
    }

    /// Bars needed before the slowest simple mean is defined.
    pub fn min_bars(&self) -> usize {
        self.periods.iter().copied().max().unwrap_or(0)
    }

    /// Returns None when any of the averages is undefined (too little history)
    /// or the band floor is not positive.
    pub fn analyze(&self, bars: &[PriceBar], timeframe: &str) -> Option<AnalysisResult> {
        let latest_close = bars.last()?.close;
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let averages: Vec<f64> = self
            .periods
            .iter()
            .flat_map(|&p| [sma(&closes, p), ema_unadjusted(&closes, p)])
            .flatten()
            .filter(|v| v.is_finite())
            .collect();

        if self.periods.is_empty() || averages.len() < self.periods.len() * 2 {
            return None;
        }

        let max_avg = averages.iter().copied().fold(f64::MIN, f64::max);
        let min_avg = averages.iter().copied().fold(f64::MAX, f64::min);
        if min_avg <= 0.0 {
            return None;
        }

        let spread_ratio = (max_avg - min_avg) / min_avg;
        let threshold = self.thresholds.threshold_for(timeframe);

        Some(AnalysisResult {
            latest_close,
            spread_ratio,
            threshold,
            is_dense: spread_ratio <= threshold,
            position: Position::classify(latest_close, min_avg, max_avg),
        })
    }
}
