use std::sync::Arc;

use alloy::primitives::Address;
use bigdecimal::BigDecimal;
use log::{debug, warn};
use num_traits::Zero;

use crate::{
    config::PricingConfig,
    db::{models::Pair, LiquidityStore},
    utils::reserve_ratio,
};

/// Native currency USD price from the configured anchor pairs.
///
/// The rate is composed from two pools:
/// - (stablecoin, bridge): `reserved_bridge`, `reserved_stable`
/// - (bridge, native): `reserved_bridge2`, `reserved_native`
///
/// `price = (reserved_bridge / reserved_bridge2) * (reserved_stable / reserved_native)`
///
/// Sides are located by token identity, so neither pool has to hold the
/// bridge token in a particular slot. The snapshot reserves are trusted as-is.
pub struct NativePriceOracle {
    config: Arc<PricingConfig>,
}

impl NativePriceOracle {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        Self { config }
    }

    /// Returns zero when either anchor pair is missing, misconfigured, or has
    /// a zero divisor reserve.
    pub fn native_price_in_usd<S: LiquidityStore + ?Sized>(&self, store: &S) -> BigDecimal {
        let anchors = &self.config.native_price;

        let (Some(stable_pair), Some(native_pair)) = (
            store.load_pair(&anchors.stable_bridge_pair),
            store.load_pair(&anchors.bridge_native_pair),
        ) else {
            debug!("Native price anchor pairs not indexed yet");
            return BigDecimal::zero();
        };

        let bridge = &anchors.bridge_token;

        let Some((reserved_bridge, reserved_stable)) = split_reserves(&stable_pair, bridge) else {
            warn!(
                "Stable anchor pair {} does not hold bridge token {}",
                stable_pair.address, bridge
            );
            return BigDecimal::zero();
        };

        if native_pair.counterpart(bridge) != Some(self.config.native_token) {
            warn!(
                "Native anchor pair {} is not a {}/{} pool",
                native_pair.address, bridge, self.config.native_token
            );
            return BigDecimal::zero();
        }
        let Some((reserved_bridge2, reserved_native)) = split_reserves(&native_pair, bridge) else {
            return BigDecimal::zero();
        };

        let bridge_weight = reserve_ratio(reserved_bridge, reserved_bridge2);
        let stable_weight = reserve_ratio(reserved_stable, reserved_native);

        bridge_weight * stable_weight
    }
}

/// (reserve of `token`, reserve of the other side)
fn split_reserves<'a>(
    pair: &'a Pair,
    token: &Address,
) -> Option<(&'a BigDecimal, &'a BigDecimal)> {
    let other = pair.counterpart(token)?;
    Some((pair.reserve_of(token)?, pair.reserve_of(&other)?))
}
