use std::{str::FromStr, sync::Arc};

use anyhow::Context;
use jemallocator::Jemalloc;
use log::{info, LevelFilter};
use serde_json::json;
use simple_logger::SimpleLogger;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use dexprice::{
    db::models::PairEvent, LiquidityStore, MemoryStore, PairIndexer, PricingConfig, Settings,
};

fn main() -> anyhow::Result<()> {
    // Optional first argument overrides the config file location
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());

    let settings = Settings::from_path(&config_path).with_context(|| {
        format!("Failed to load {}. Please ensure it exists and is valid", config_path)
    })?;

    SimpleLogger::new()
        .with_level(LevelFilter::from_str(&settings.log_level).unwrap_or(LevelFilter::Info))
        .init()
        .context("Failed to initialise logger")?;

    let pricing = Arc::new(
        PricingConfig::try_from(&settings.pricing).context("Invalid pricing configuration")?,
    );

    let replay = settings
        .replay
        .as_ref()
        .context("Missing `replay` section in configuration")?;

    let raw = std::fs::read_to_string(&replay.events_file)
        .with_context(|| format!("Failed to read events file {}", replay.events_file))?;
    let events: Vec<PairEvent> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse events file {}", replay.events_file))?;

    info!(
        "Replaying {} events ({} whitelist anchors, {} bridge tokens)",
        events.len(),
        pricing.whitelist.len(),
        pricing.bridge_tokens.len()
    );

    let mut indexer = PairIndexer::new(pricing, MemoryStore::new());
    indexer.replay(&events);

    let store = indexer.into_store();
    let bundle = store.load_bundle();
    info!("Native price: {} USD", bundle.native_price_usd);

    let tokens: Vec<_> = store
        .tokens()
        .into_iter()
        .map(|token| {
            let derived_native = token.derived_native_or_zero();
            let price_usd = &derived_native * &bundle.native_price_usd;
            info!("Token {}: {} native ({} USD)", token.address, derived_native, price_usd);

            json!({
                "address": token.address.to_string(),
                "derived_native": derived_native.to_string(),
                "price_usd": price_usd.to_string(),
                "trade_volume_usd": token.trade_volume_usd.to_string(),
                "total_liquidity": token.total_liquidity.to_string(),
            })
        })
        .collect();

    let pairs: Vec<_> = store
        .pairs()
        .into_iter()
        .map(|pair| {
            json!({
                "address": pair.address.to_string(),
                "token0": pair.token0.to_string(),
                "token1": pair.token1.to_string(),
                "reserve_usd": pair.reserve_usd.to_string(),
                "tracked_reserve_native": pair.tracked_reserve_native.to_string(),
                "volume_usd": pair.volume_usd.to_string(),
                "untracked_volume_usd": pair.untracked_volume_usd.to_string(),
            })
        })
        .collect();

    let report = json!({
        "native_price_usd": bundle.native_price_usd.to_string(),
        "tokens": tokens,
        "pairs": pairs,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
