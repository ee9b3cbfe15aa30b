pub mod analyzer;
pub mod config;
pub mod logger;
pub mod market;
pub mod model;
pub mod notifier;
pub mod scanner;
