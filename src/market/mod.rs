pub mod fetcher;
pub mod traits;

pub use fetcher::BinanceFetcher;
pub use traits::MarketData;
