use std::collections::HashMap;

pub const DEFAULT_THRESHOLD: f64 = 0.012;

/// Per-timeframe ceiling on the spread ratio. Shorter timeframes are noisier
/// and get tighter limits.
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    limits: HashMap<String, f64>,
    fallback: f64,
}

impl ThresholdTable {
    pub fn new(limits: HashMap<String, f64>, fallback: f64) -> Self {
        Self { limits, fallback }
    }

    pub fn threshold_for(&self, timeframe: &str) -> f64 {
        self.limits.get(timeframe).copied().unwrap_or(self.fallback)
    }
}
