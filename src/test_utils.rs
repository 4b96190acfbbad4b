//! Shared fixtures for unit tests.

use std::str::FromStr;

use alloy::primitives::{address, Address};
use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::{
    config::{BridgeToken, NativePriceAnchors, PricingConfig},
    db::{
        models::{Pair, Token},
        LiquidityStore, MemoryStore,
    },
};

pub const NATIVE: Address = address!("0x0000000000000000000000000000000000000a01");
pub const STABLE: Address = address!("0x0000000000000000000000000000000000000a02");
pub const MAJOR: Address = address!("0x0000000000000000000000000000000000000a03");

/// Primary bridge: also anchors the native/USD rate.
pub const BRIDGE: Address = address!("0x0000000000000000000000000000000000000b01");
/// Secondary bridge: only a fallback hop.
pub const BRIDGE2: Address = address!("0x0000000000000000000000000000000000000b02");

pub const TOKEN_X: Address = address!("0x0000000000000000000000000000000000000c01");
pub const TOKEN_Y: Address = address!("0x0000000000000000000000000000000000000c02");

pub const STABLE_BRIDGE_PAIR: Address = address!("0x0000000000000000000000000000000000000d01");
pub const BRIDGE_NATIVE_PAIR: Address = address!("0x0000000000000000000000000000000000000d02");
pub const BRIDGE2_NATIVE_PAIR: Address = address!("0x0000000000000000000000000000000000000d03");

pub fn bd(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

/// Whitelist order: NATIVE, STABLE, MAJOR. Bridge order: BRIDGE2, BRIDGE.
pub fn pricing_config() -> PricingConfig {
    PricingConfig {
        native_token: NATIVE,
        whitelist: vec![NATIVE, STABLE, MAJOR],
        bridge_tokens: vec![
            BridgeToken {
                token: BRIDGE2,
                native_pair: BRIDGE2_NATIVE_PAIR,
            },
            BridgeToken {
                token: BRIDGE,
                native_pair: BRIDGE_NATIVE_PAIR,
            },
        ],
        native_price: NativePriceAnchors {
            bridge_token: BRIDGE,
            stable_bridge_pair: STABLE_BRIDGE_PAIR,
            bridge_native_pair: BRIDGE_NATIVE_PAIR,
        },
        minimum_liquidity_threshold_native: BigDecimal::zero(),
    }
}

#[derive(Default)]
pub struct StoreBuilder {
    store: MemoryStore,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pair(
        mut self,
        address: Address,
        token0: Address,
        reserve0: &str,
        token1: Address,
        reserve1: &str,
        reserve_native: &str,
    ) -> Self {
        let mut pair = Pair::new(address, token0, token1);
        pair.set_reserves(bd(reserve0), bd(reserve1));
        pair.reserve_native = bd(reserve_native);
        self.store.register_pair(pair);
        self
    }

    pub fn token(mut self, address: Address, derived_native: &str) -> Self {
        let mut token = Token::new(address, 18);
        token.derived_native = Some(bd(derived_native));
        self.store.save_token(token);
        self
    }

    pub fn build(self) -> MemoryStore {
        self.store
    }
}
