use alloy::primitives::{address, Address};
use anyhow::{anyhow, Context};
use bigdecimal::BigDecimal;
use config::{Config, ConfigError, File};
use num_traits::Zero;
use serde::Deserialize;

use crate::utils::{parse_address, parse_decimal};

/// Anchor pairs used to bootstrap the native/USD rate.
///
/// The rate is composed from a (stablecoin, bridge) pool and a
/// (bridge, native) pool; `bridge_token` tells the oracle which side is which.
#[derive(Debug, Deserialize, Clone)]
pub struct NativePriceSettings {
    pub bridge_token: String,
    pub stable_bridge_pair: String,
    pub bridge_native_pair: String,
}

/// Fallback hop token and the (token, native) pair quoting it.
#[derive(Debug, Deserialize, Clone)]
pub struct BridgeTokenSettings {
    pub token: String,
    pub native_pair: String,
}

/// Per-deployment pricing configuration.
///
/// `whitelist` and `bridge_tokens` are ordered: the resolver takes the first
/// match, so list order is part of the configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    pub native_token: String,
    pub whitelist: Vec<String>,
    #[serde(default)]
    pub bridge_tokens: Vec<BridgeTokenSettings>,
    pub native_price: NativePriceSettings,
    /// Minimum native-valued liquidity (decimal string) a pair must exceed.
    #[serde(default = "default_minimum_liquidity_threshold")]
    pub minimum_liquidity_threshold_native: String,
}

fn default_minimum_liquidity_threshold() -> String {
    "0".to_string()
}

/// Offline replay configuration for the binary.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySettings {
    /// JSON file holding an ordered array of decoded pair events.
    pub events_file: String,
}

/// Root application configuration.
///
/// Loaded from `config.yaml` at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub pricing: PricingSettings,
    #[serde(default)]
    pub replay: Option<ReplaySettings>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_path("config")
    }

    /// Load from an explicit file; the extension may be omitted.
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }
}

// ============================================
// Validated configuration
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub struct NativePriceAnchors {
    pub bridge_token: Address,
    pub stable_bridge_pair: Address,
    pub bridge_native_pair: Address,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BridgeToken {
    pub token: Address,
    pub native_pair: Address,
}

/// Typed pricing configuration shared by the resolver, oracle and calculators.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub native_token: Address,
    pub whitelist: Vec<Address>,
    pub bridge_tokens: Vec<BridgeToken>,
    pub native_price: NativePriceAnchors,
    pub minimum_liquidity_threshold_native: BigDecimal,
}

impl PricingConfig {
    pub fn is_whitelisted(&self, token: &Address) -> bool {
        self.whitelist.contains(token)
    }

    pub fn is_native(&self, token: &Address) -> bool {
        self.native_token == *token
    }

    /// BSC deployment of the DESIRE/TASTE exchange.
    pub fn bsc_desire() -> Self {
        const WBNB: Address = address!("0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c");
        const DESIRE: Address = address!("0xc8846b0877cec21336ba3136208fd02d42ac7b5e");
        const TASTE: Address = address!("0xdb238123939637d65a03e4b2b485650b4f9d91cb");
        const DESIRE_WBNB_PAIR: Address = address!("0xd3cbd6eeaed5b7a6f873c323107ae2aa2d640055");

        Self {
            native_token: WBNB,
            whitelist: vec![
                WBNB,
                address!("0xe9e7cea3dedca5984780bafc599bd69add087d56"), // BUSD
                address!("0x55d398326f99059ff775485246999027b3197955"), // USDT
                address!("0x8ac76a51cc950d9822d68b83fe1ad97b32cd580d"), // USDC
                address!("0x23396cf899ca06c4472205fc903bdb4de249d6fc"), // UST
                address!("0x7130d2a12b9bcbfae4f2634d864a1ee1ce3ead9c"), // BTCB
                address!("0x2170ed0880ac9a755fd29b2688956bd959f933f8"), // WETH
            ],
            bridge_tokens: vec![
                BridgeToken {
                    token: TASTE,
                    native_pair: address!("0x92b52d1b7a07ed3b4456259cfa42a4fbe9dde4b2"),
                },
                BridgeToken {
                    token: DESIRE,
                    native_pair: DESIRE_WBNB_PAIR,
                },
            ],
            native_price: NativePriceAnchors {
                bridge_token: DESIRE,
                stable_bridge_pair: address!("0x8b0ad45437c5b7d923e67a305c2b0fe178683f7b"),
                bridge_native_pair: DESIRE_WBNB_PAIR,
            },
            minimum_liquidity_threshold_native: BigDecimal::zero(),
        }
    }
}

fn required_address(value: &str, field: &str) -> anyhow::Result<Address> {
    parse_address(value).ok_or_else(|| anyhow!("Invalid address {:?} for {}", value, field))
}

impl TryFrom<&PricingSettings> for PricingConfig {
    type Error = anyhow::Error;

    fn try_from(settings: &PricingSettings) -> anyhow::Result<Self> {
        let native_token = required_address(&settings.native_token, "pricing.native_token")?;

        let whitelist = settings
            .whitelist
            .iter()
            .enumerate()
            .map(|(i, token)| required_address(token, &format!("pricing.whitelist[{}]", i)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let bridge_tokens = settings
            .bridge_tokens
            .iter()
            .enumerate()
            .map(|(i, bridge)| {
                Ok(BridgeToken {
                    token: required_address(
                        &bridge.token,
                        &format!("pricing.bridge_tokens[{}].token", i),
                    )?,
                    native_pair: required_address(
                        &bridge.native_pair,
                        &format!("pricing.bridge_tokens[{}].native_pair", i),
                    )?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let native_price = NativePriceAnchors {
            bridge_token: required_address(
                &settings.native_price.bridge_token,
                "pricing.native_price.bridge_token",
            )?,
            stable_bridge_pair: required_address(
                &settings.native_price.stable_bridge_pair,
                "pricing.native_price.stable_bridge_pair",
            )?,
            bridge_native_pair: required_address(
                &settings.native_price.bridge_native_pair,
                "pricing.native_price.bridge_native_pair",
            )?,
        };

        let minimum_liquidity_threshold_native =
            parse_decimal(&settings.minimum_liquidity_threshold_native).with_context(|| {
                format!(
                    "Invalid pricing.minimum_liquidity_threshold_native {:?}",
                    settings.minimum_liquidity_threshold_native
                )
            })?;

        Ok(Self {
            native_token,
            whitelist,
            bridge_tokens,
            native_price,
            minimum_liquidity_threshold_native,
        })
    }
}
