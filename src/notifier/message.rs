// HTML bodies for PushPlus (template = "html")
use crate::model::AnalysisResult;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

pub const ALERT_TITLE: &str = "🔥 MA density alert";
const SEPARATOR: &str = "------------------------------";

/// Base asset of a pair: "BTC/USDT" -> "BTC".
pub fn display_symbol(symbol: &str) -> &str {
    symbol.split_once('/').map(|(base, _)| base).unwrap_or(symbol)
}

pub fn format_signal_line(symbol: &str, timeframe: &str, res: &AnalysisResult) -> String {
    format!(
        "<b>{} - {}</b><br>\
         Price: {:.4}<br>\
         Density: {:.2}% (threshold ≤{:.1}%)<br>\
         Position: <font color='{}'><b>{}</b></font><br>\
         {}",
        display_symbol(symbol),
        timeframe,
        res.latest_close,
        res.spread_ratio * 100.0,
        res.threshold * 100.0,
        res.position.color(),
        res.position.label(),
        SEPARATOR
    )
}

/// Joins signal lines and stamps the scan time at the bottom.
pub fn compose_report<Tz>(lines: &[String], scanned_at: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}<br><br>Scan time: {}",
        lines.join("<br>"),
        scanned_at.format("%Y-%m-%d %H:%M")
    )
}
