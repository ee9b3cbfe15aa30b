// Analyzer module: moving averages, threshold policy and the density check built on them.

pub mod density;
pub mod moving_average;
pub mod threshold;

pub use density::DensityAnalyzer;
pub use threshold::ThresholdTable;
