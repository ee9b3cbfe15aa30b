use ma_density_sniper::config::{self, AppConfig, load_config};
use ma_density_sniper::logger::init_logging;
use ma_density_sniper::market::BinanceFetcher;
use ma_density_sniper::notifier::PushPlusNotifier;
use ma_density_sniper::scanner::Scanner;
use std::sync::Arc;
use tokio::time::{Duration, sleep};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config_path =
        std::env::var(config::CONFIG_PATH_ENV).unwrap_or_else(|_| "config.json".to_string());

    // The log level lives in the config, so read it before the subscriber exists.
    let level = std::fs::read_to_string(&config_path)
        .ok()
        .and_then(|c| config::parse_config(&c).ok())
        .map(|c| c.log_level)
        .unwrap_or_else(|| AppConfig::default().log_level);
    init_logging(&level);

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let market = match BinanceFetcher::new(config.exchange_base_url.clone()) {
        Ok(m) => Arc::new(m),
        Err(e) => {
            error!("Failed to build market client: {}", e);
            return;
        }
    };
    let notifier = match PushPlusNotifier::new(config.pushplus_token.clone()) {
        Ok(n) => Arc::new(n),
        Err(e) => {
            error!("Failed to build notifier: {}", e);
            return;
        }
    };

    info!(
        "🚀 MA density sniper: {} symbols x {} timeframes",
        config.symbols.len(),
        config.timeframes.len()
    );
    let scanner = Scanner::new(config.clone(), market, notifier);

    match config.scan_interval_seconds {
        None => {
            scanner.run_scan().await;
        }
        Some(interval) => loop {
            scanner.run_scan().await;
            info!("Waiting {}s until next scan...", interval);
            sleep(Duration::from_secs(interval)).await;
        },
    }
}
