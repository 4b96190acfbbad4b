pub mod config;
pub mod db;
pub mod utils;
pub mod worker;

#[cfg(test)]
mod test_utils;

pub use config::{PricingConfig, Settings};
pub use db::{LiquidityStore, MemoryStore};
pub use worker::{NativePriceOracle, PairIndexer, PriceResolver, TrackedMetrics};
