#[allow(clippy::module_inception)]
mod config;

pub use config::{
    BridgeToken, BridgeTokenSettings, NativePriceAnchors, NativePriceSettings, PricingConfig,
    PricingSettings, ReplaySettings, Settings,
};
