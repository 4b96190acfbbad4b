use std::sync::Arc;

use alloy::primitives::Address;
use bigdecimal::BigDecimal;
use log::{debug, warn};
use num_traits::{One, Zero};

use crate::{
    config::PricingConfig,
    db::{models::Pair, LiquidityStore},
};

/// Derives a token's price in native-currency units.
///
/// Resolution runs in two phases, each scanned once:
/// 1. Whitelist anchors, in configured order. The first anchor with an
///    eligible (token, anchor) pair wins, even if a later anchor has a deeper
///    pool: `price_in_anchor * anchor.derived_native`.
/// 2. Only if phase 1 found nothing: bridge tokens, in configured order.
///    `price_in_bridge * bridge_native_reference`, where the reference is the
///    bridge's instantaneous ratio in its fixed (bridge, native) pair, never
///    resolved recursively.
///
/// A pair is eligible when it exists and its `reserve_native` is strictly
/// above the configured minimum liquidity threshold.
pub struct PriceResolver {
    config: Arc<PricingConfig>,
}

impl PriceResolver {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        Self { config }
    }

    /// Native-denominated price of `token`.
    ///
    /// Never fails: returns 1 for the native token itself and 0 when no path
    /// to an anchor exists.
    pub fn find_native_per_token<S: LiquidityStore + ?Sized>(
        &self,
        store: &S,
        token: &Address,
    ) -> BigDecimal {
        if self.config.is_native(token) {
            return BigDecimal::one();
        }

        if let Some(price) = self.price_via_whitelist(store, token) {
            return price;
        }

        if let Some(price) = self.price_via_bridge_tokens(store, token) {
            return price;
        }

        debug!("No pricing path for token {}", token);
        BigDecimal::zero()
    }

    fn price_via_whitelist<S: LiquidityStore + ?Sized>(
        &self,
        store: &S,
        token: &Address,
    ) -> Option<BigDecimal> {
        for anchor in &self.config.whitelist {
            if anchor == token {
                continue;
            }

            let Some(pair) = self.eligible_pair(store, token, anchor) else {
                continue;
            };
            let Some(price_in_anchor) = pair.price_of(token) else {
                continue;
            };

            // A missing anchor record prices at zero rather than skipping the match
            let anchor_native = store
                .load_token(anchor)
                .map(|t| t.derived_native_or_zero())
                .unwrap_or_else(BigDecimal::zero);

            debug!("Priced {} via whitelist anchor {} (pair {})", token, anchor, pair.address);
            return Some(price_in_anchor * anchor_native);
        }

        None
    }

    fn price_via_bridge_tokens<S: LiquidityStore + ?Sized>(
        &self,
        store: &S,
        token: &Address,
    ) -> Option<BigDecimal> {
        for bridge in &self.config.bridge_tokens {
            if bridge.token == *token {
                continue;
            }

            let Some(pair) = self.eligible_pair(store, token, &bridge.token) else {
                continue;
            };
            let Some(reference) = store.load_pair(&bridge.native_pair) else {
                continue;
            };

            if reference.counterpart(&bridge.token) != Some(self.config.native_token) {
                warn!(
                    "Bridge reference pair {} is not a {}/{} pool",
                    reference.address, bridge.token, self.config.native_token
                );
                continue;
            }

            let (Some(price_in_bridge), Some(bridge_native)) =
                (pair.price_of(token), reference.price_of(&bridge.token))
            else {
                continue;
            };

            debug!("Priced {} via bridge token {} (pair {})", token, bridge.token, pair.address);
            return Some(price_in_bridge * bridge_native);
        }

        None
    }

    /// The (token, other) pair, if it exists and clears the liquidity threshold.
    fn eligible_pair<S: LiquidityStore + ?Sized>(
        &self,
        store: &S,
        token: &Address,
        other: &Address,
    ) -> Option<Pair> {
        let pair_address = store.get_pair_address(token, other);
        if pair_address == Address::ZERO {
            return None;
        }

        let Some(pair) = store.load_pair(&pair_address) else {
            warn!("Factory returned pair {} but no record is indexed", pair_address);
            return None;
        };

        (pair.reserve_native > self.config.minimum_liquidity_threshold_native).then_some(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        bd, pricing_config, StoreBuilder, BRIDGE, BRIDGE2, BRIDGE2_NATIVE_PAIR,
        BRIDGE_NATIVE_PAIR, MAJOR, NATIVE, STABLE, TOKEN_X, TOKEN_Y,
    };
    use alloy::primitives::address;

    const X_NATIVE: Address = address!("0x0000000000000000000000000000000000000e01");
    const X_STABLE: Address = address!("0x0000000000000000000000000000000000000e02");
    const X_MAJOR: Address = address!("0x0000000000000000000000000000000000000e03");
    const X_BRIDGE: Address = address!("0x0000000000000000000000000000000000000e04");
    const X_BRIDGE2: Address = address!("0x0000000000000000000000000000000000000e05");

    fn resolver() -> PriceResolver {
        PriceResolver::new(Arc::new(pricing_config()))
    }

    fn anchors() -> StoreBuilder {
        StoreBuilder::new()
            .token(NATIVE, "1")
            .token(STABLE, "0.0025")
            .token(MAJOR, "20")
            .pair(BRIDGE_NATIVE_PAIR, NATIVE, "10", BRIDGE, "500", "20")
            .pair(BRIDGE2_NATIVE_PAIR, BRIDGE2, "400", NATIVE, "100", "200")
    }

    #[test]
    fn test_native_token_is_one() {
        let store = StoreBuilder::new().build();
        assert_eq!(resolver().find_native_per_token(&store, &NATIVE), BigDecimal::one());
    }

    #[test]
    fn test_no_pairs_is_zero() {
        let store = anchors().build();
        assert!(resolver().find_native_per_token(&store, &TOKEN_Y).is_zero());
    }

    #[test]
    fn test_direct_native_pair() {
        // 1 X = 4 NATIVE
        let store = anchors()
            .pair(X_NATIVE, TOKEN_X, "25", NATIVE, "100", "200")
            .build();

        assert_eq!(resolver().find_native_per_token(&store, &TOKEN_X), bd("4"));
    }

    #[test]
    fn test_token_in_slot1_uses_token0_price() {
        // 1 X = 2000 / 1000 = 2 STABLE, STABLE = 0.0025 NATIVE
        let store = anchors()
            .pair(X_STABLE, STABLE, "2000", TOKEN_X, "1000", "10")
            .build();

        assert_eq!(resolver().find_native_per_token(&store, &TOKEN_X), bd("0.005"));
    }

    #[test]
    fn test_first_whitelist_anchor_wins_over_deeper_pool() {
        // STABLE comes before MAJOR in the whitelist; MAJOR's pool is far deeper
        let store = anchors()
            .pair(X_STABLE, TOKEN_X, "1000", STABLE, "2000", "5")
            .pair(X_MAJOR, TOKEN_X, "1000000", MAJOR, "1", "100000")
            .build();

        // 2 STABLE * 0.0025
        assert_eq!(resolver().find_native_per_token(&store, &TOKEN_X), bd("0.005"));
    }

    #[test]
    fn test_ineligible_whitelist_pair_falls_back_to_bridge() {
        // Whitelist pair exists but has no native liquidity; bridge pair is eligible
        let store = anchors()
            .pair(X_STABLE, TOKEN_X, "0", STABLE, "0", "0")
            .pair(X_BRIDGE, TOKEN_X, "100", BRIDGE, "300", "1")
            .build();

        // 1 X = 3 BRIDGE, 1 BRIDGE = 10 / 500 NATIVE
        assert_eq!(resolver().find_native_per_token(&store, &TOKEN_X), bd("0.06"));
    }

    #[test]
    fn test_bridge_tokens_follow_configured_order() {
        // BRIDGE2 is listed before BRIDGE
        let store = anchors()
            .pair(X_BRIDGE, TOKEN_X, "100", BRIDGE, "300", "1")
            .pair(X_BRIDGE2, BRIDGE2, "50", TOKEN_X, "100", "1")
            .build();

        // 1 X = 0.5 BRIDGE2, 1 BRIDGE2 = 100 / 400 NATIVE
        assert_eq!(resolver().find_native_per_token(&store, &TOKEN_X), bd("0.125"));
    }

    #[test]
    fn test_bridge_without_reference_pair_is_skipped() {
        let store = StoreBuilder::new()
            .pair(X_BRIDGE2, TOKEN_X, "100", BRIDGE2, "100", "1")
            .build();

        assert!(resolver().find_native_per_token(&store, &TOKEN_X).is_zero());
    }

    #[test]
    fn test_liquidity_threshold_filters_thin_pools() {
        let mut config = pricing_config();
        config.minimum_liquidity_threshold_native = bd("50");
        let resolver = PriceResolver::new(Arc::new(config));

        let store = anchors()
            .pair(X_NATIVE, TOKEN_X, "25", NATIVE, "100", "50")
            .pair(X_STABLE, TOKEN_X, "1000", STABLE, "2000", "51")
            .build();

        // NATIVE pair sits exactly on the threshold and is skipped
        assert_eq!(resolver.find_native_per_token(&store, &TOKEN_X), bd("0.005"));
    }

    #[test]
    fn test_missing_anchor_token_record_prices_zero() {
        let store = StoreBuilder::new()
            .pair(X_MAJOR, TOKEN_X, "1", MAJOR, "1", "1")
            .build();

        assert!(resolver().find_native_per_token(&store, &TOKEN_X).is_zero());
    }

    #[test]
    fn test_zero_reserve_pair_does_not_fault() {
        let store = anchors()
            .pair(X_NATIVE, TOKEN_X, "10", NATIVE, "0", "1")
            .build();

        assert!(resolver().find_native_per_token(&store, &TOKEN_X).is_zero());
    }

    #[test]
    fn test_repeated_resolution_is_identical() {
        let store = anchors()
            .pair(X_STABLE, TOKEN_X, "3", STABLE, "7", "1")
            .build();

        let first = resolver().find_native_per_token(&store, &TOKEN_X);
        let second = resolver().find_native_per_token(&store, &TOKEN_X);
        assert_eq!(first.to_string(), second.to_string());
        assert!(!first.is_zero());
    }
}
