/// Arithmetic mean of the last `period` values.
/// None when the series is shorter than the period.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Latest value of an unadjusted exponential mean with alpha = 2 / (period + 1).
///
/// The recursion is seeded with the first value and runs over the whole
/// series, so the result depends on how much history is passed in.
pub fn ema_unadjusted(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 {
        return None;
    }
    let (first, rest) = values.split_first()?;
    let alpha = 2.0 / (period as f64 + 1.0);
    Some(
        rest.iter()
            .fold(*first, |prev, &value| alpha * value + (1.0 - alpha) * prev),
    )
}
