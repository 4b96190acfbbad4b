pub mod indexer;
pub mod native_price;
pub mod price_resolver;
pub mod tracked;

pub use indexer::PairIndexer;
pub use native_price::NativePriceOracle;
pub use price_resolver::PriceResolver;
pub use tracked::TrackedMetrics;
