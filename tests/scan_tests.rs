
use std::sync::Arc;

use ma_density_sniper::config::AppConfig;
use ma_density_sniper::scanner::{ScanReport, Scanner};
use mock_collaborators::{Canned, MockMarket, MockNotifier, bars_from, breakout, flat};

fn config(symbols: &[&str], timeframes: &[&str]) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        timeframes: timeframes.iter().map(|s| s.to_string()).collect(),
        request_delay_ms: 0,
        ..AppConfig::default()
    })
}

fn scanner(cfg: Arc<AppConfig>, market: &MockMarket, notifier: &MockNotifier) -> Scanner {
    Scanner::new(cfg, Arc::new(market.clone()), Arc::new(notifier.clone()))
}

#[tokio::test]
async fn no_signal_means_no_push() {
    let market = MockMarket::new();
    market.set("BTC/USDT", "1h", Canned::Bars(breakout())).await;
    market.set("BTC/USDT", "4h", Canned::Bars(breakout())).await;
    let notifier = MockNotifier::new();

    let report = scanner(config(&["BTC/USDT"], &["1h", "4h"]), &market, &notifier)
        .run_scan()
        .await;

    assert_eq!(report.signals, 0);
    assert!(!report.notified);
    assert!(notifier.sent.lock().await.is_empty());
}

#[tokio::test]
async fn single_signal_pushes_once() {
    let market = MockMarket::new();
    market.set("BTC/USDT", "1h", Canned::Bars(breakout())).await;
    market.set("ETH/USDT", "1h", Canned::Bars(breakout())).await;
    market.set("ETH/USDT", "4h", Canned::Bars(flat(200))).await;
    let notifier = MockNotifier::new();

    let report = scanner(
        config(&["BTC/USDT", "ETH/USDT"], &["1h", "4h"]),
        &market,
        &notifier,
    )
    .run_scan()
    .await;

    assert_eq!(
        report,
        ScanReport { pairs_scanned: 4, signals: 1, skipped: 1, notified: true }
    );

    let sent = notifier.sent.lock().await;
    assert_eq!(sent.len(), 1);
    let (title, body) = &sent[0];
    assert!(title.contains("MA density"));
    assert!(body.contains("<b>ETH - 4h</b>"));
    assert!(!body.contains("BTC"));
    assert!(body.contains("MAs entangled"));

    let stamp = body.rsplit("Scan time: ").next().unwrap();
    assert_eq!(stamp.len(), "2024-01-01 00:00".len());
    assert!(body.contains("<br><br>Scan time: "));
}

#[tokio::test]
async fn all_signals_are_combined_in_one_push() {
    let market = MockMarket::new();
    for tf in ["5m", "1d"] {
        market.set("SOL/USDT", tf, Canned::Bars(flat(300))).await;
    }
    let notifier = MockNotifier::new();

    let report = scanner(config(&["SOL/USDT"], &["5m", "1d"]), &market, &notifier)
        .run_scan()
        .await;

    assert_eq!(report.signals, 2);
    let sent = notifier.sent.lock().await;
    assert_eq!(sent.len(), 1);
    let body = &sent[0].1;
    let first = body.find("SOL - 5m").unwrap();
    let second = body.find("SOL - 1d").unwrap();
    assert!(first < second);
    assert!(body.contains("threshold ≤0.6%"));
    assert!(body.contains("threshold ≤3.0%"));
}

#[tokio::test]
async fn short_history_and_failures_are_skipped() {
    let market = MockMarket::new();
    market.set("BTC/USDT", "5m", Canned::Bars(flat(50))).await;
    market.set("BTC/USDT", "15m", Canned::Fail).await;
    // "1h" has no canned data: empty response
    market.set("BTC/USDT", "4h", Canned::Bars(flat(200))).await;
    let notifier = MockNotifier::new();

    let report = scanner(
        config(&["BTC/USDT"], &["5m", "15m", "1h", "4h"]),
        &market,
        &notifier,
    )
    .run_scan()
    .await;

    assert_eq!(report.pairs_scanned, 4);
    assert_eq!(report.skipped, 3);
    assert_eq!(report.signals, 1);
    assert_eq!(notifier.sent.lock().await.len(), 1);
}

#[tokio::test]
async fn pairs_are_requested_in_configured_order_with_lookback() {
    let market = MockMarket::new();
    let notifier = MockNotifier::new();
    let cfg = config(&["BTC/USDT", "ETH/USDT"], &["1w", "5m"]);

    scanner(cfg.clone(), &market, &notifier).run_scan().await;

    let calls = market.calls.lock().await;
    let order: Vec<(&str, &str)> = calls
        .iter()
        .map(|(s, t, _)| (s.as_str(), t.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("BTC/USDT", "1w"),
            ("BTC/USDT", "5m"),
            ("ETH/USDT", "1w"),
            ("ETH/USDT", "5m"),
        ]
    );
    assert!(calls.iter().all(|(_, _, limit)| *limit == cfg.lookback_bars));
    assert!(notifier.sent.lock().await.is_empty());
}

#[tokio::test]
async fn failed_push_does_not_break_scan() {
    let market = MockMarket::new();
    market.set("BTC/USDT", "1h", Canned::Bars(flat(200))).await;
    let notifier = MockNotifier::failing();

    let report = scanner(config(&["BTC/USDT"], &["1h"]), &market, &notifier)
        .run_scan()
        .await;

    assert_eq!(report.signals, 1);
    assert!(report.notified);
    assert_eq!(notifier.sent.lock().await.len(), 1);
}

#[tokio::test]
async fn undefined_averages_are_skipped_without_push() {
    let mut closes = vec![100.0; 200];
    closes[199] = f64::NAN;
    let market = MockMarket::new();
    market.set("BTC/USDT", "1h", Canned::Bars(bars_from(&closes))).await;
    let notifier = MockNotifier::new();

    let report = scanner(config(&["BTC/USDT"], &["1h"]), &market, &notifier)
        .run_scan()
        .await;

    assert_eq!(
        report,
        ScanReport { pairs_scanned: 1, signals: 0, skipped: 1, notified: false }
    );
    assert!(notifier.sent.lock().await.is_empty());
}

#[tokio::test]
async fn unconfigured_sink_still_receives_the_report() {
    let market = MockMarket::new();
    market.set("ETH/USDT", "1d", Canned::Bars(flat(200))).await;
    let notifier = MockNotifier::unconfigured();

    let report = scanner(config(&["ETH/USDT"], &["1d"]), &market, &notifier)
        .run_scan()
        .await;

    assert_eq!(report.signals, 1);
    assert!(report.notified);
    assert_eq!(notifier.sent.lock().await.len(), 1);
}
