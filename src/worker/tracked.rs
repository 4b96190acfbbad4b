use std::sync::Arc;

use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::{
    config::PricingConfig,
    db::models::{Bundle, Token},
    utils::{double, half},
};

/// Whitelist-gated USD metrics.
///
/// Each leg is valued at `amount * derived_native * native_price_usd`; only
/// legs whose token is whitelisted are trusted.
///
/// | whitelisted | volume          | liquidity      |
/// |-------------|-----------------|----------------|
/// | both        | average of legs | sum of legs    |
/// | one         | that leg        | that leg * 2   |
/// | neither     | 0               | 0              |
pub struct TrackedMetrics {
    config: Arc<PricingConfig>,
}

impl TrackedMetrics {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        Self { config }
    }

    pub fn tracked_volume_usd(
        &self,
        bundle: &Bundle,
        amount0: &BigDecimal,
        token0: &Token,
        amount1: &BigDecimal,
        token1: &Token,
    ) -> BigDecimal {
        let leg0 = leg_usd(bundle, amount0, token0);
        let leg1 = leg_usd(bundle, amount1, token1);

        match (self.is_tracked(token0), self.is_tracked(token1)) {
            (true, true) => half(&(leg0 + leg1)),
            (true, false) => leg0,
            (false, true) => leg1,
            (false, false) => BigDecimal::zero(),
        }
    }

    pub fn tracked_liquidity_usd(
        &self,
        bundle: &Bundle,
        amount0: &BigDecimal,
        token0: &Token,
        amount1: &BigDecimal,
        token1: &Token,
    ) -> BigDecimal {
        let leg0 = leg_usd(bundle, amount0, token0);
        let leg1 = leg_usd(bundle, amount1, token1);

        match (self.is_tracked(token0), self.is_tracked(token1)) {
            (true, true) => leg0 + leg1,
            (true, false) => double(&leg0),
            (false, true) => double(&leg1),
            (false, false) => BigDecimal::zero(),
        }
    }

    fn is_tracked(&self, token: &Token) -> bool {
        self.config.is_whitelisted(&token.address)
    }
}

/// USD value of `amount` of `token` at its current derived price.
pub fn leg_usd(bundle: &Bundle, amount: &BigDecimal, token: &Token) -> BigDecimal {
    amount * token.derived_native_or_zero() * &bundle.native_price_usd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{bd, pricing_config, MAJOR, NATIVE, STABLE, TOKEN_X, TOKEN_Y};
    use alloy::primitives::Address;

    fn metrics() -> TrackedMetrics {
        TrackedMetrics::new(Arc::new(pricing_config()))
    }

    fn bundle() -> Bundle {
        Bundle {
            native_price_usd: bd("400"),
        }
    }

    fn token(address: Address, derived: &str) -> Token {
        let mut token = Token::new(address, 18);
        token.derived_native = Some(bd(derived));
        token
    }

    #[test]
    fn test_volume_both_whitelisted_is_average() {
        // legs: 10 * 1 * 400 = 4000, 2000 * 0.0025 * 400 = 2000
        let volume = metrics().tracked_volume_usd(
            &bundle(),
            &bd("10"),
            &token(NATIVE, "1"),
            &bd("2000"),
            &token(STABLE, "0.0025"),
        );
        assert_eq!(volume, bd("3000"));
    }

    #[test]
    fn test_volume_one_whitelisted_is_that_leg() {
        let volume = metrics().tracked_volume_usd(
            &bundle(),
            &bd("5"),
            &token(TOKEN_X, "3"),
            &bd("10"),
            &token(NATIVE, "1"),
        );
        assert_eq!(volume, bd("4000"));

        let volume = metrics().tracked_volume_usd(
            &bundle(),
            &bd("2"),
            &token(MAJOR, "20"),
            &bd("10"),
            &token(TOKEN_X, "3"),
        );
        assert_eq!(volume, bd("16000"));
    }

    #[test]
    fn test_volume_neither_whitelisted_is_zero() {
        let volume = metrics().tracked_volume_usd(
            &bundle(),
            &bd("5"),
            &token(TOKEN_X, "3"),
            &bd("10"),
            &token(TOKEN_Y, "1"),
        );
        assert!(volume.is_zero());
    }

    #[test]
    fn test_liquidity_both_whitelisted_is_sum() {
        let liquidity = metrics().tracked_liquidity_usd(
            &bundle(),
            &bd("10"),
            &token(NATIVE, "1"),
            &bd("2000"),
            &token(STABLE, "0.0025"),
        );
        assert_eq!(liquidity, bd("6000"));
    }

    #[test]
    fn test_liquidity_one_whitelisted_is_doubled() {
        let liquidity = metrics().tracked_liquidity_usd(
            &bundle(),
            &bd("5"),
            &token(TOKEN_X, "3"),
            &bd("10"),
            &token(NATIVE, "1"),
        );
        assert_eq!(liquidity, bd("8000"));

        let liquidity = metrics().tracked_liquidity_usd(
            &bundle(),
            &bd("2"),
            &token(MAJOR, "20"),
            &bd("10"),
            &token(TOKEN_X, "3"),
        );
        assert_eq!(liquidity, bd("32000"));
    }

    #[test]
    fn test_liquidity_neither_whitelisted_is_zero() {
        let liquidity = metrics().tracked_liquidity_usd(
            &bundle(),
            &bd("5"),
            &token(TOKEN_X, "3"),
            &bd("10"),
            &token(TOKEN_Y, "1"),
        );
        assert!(liquidity.is_zero());
    }

    #[test]
    fn test_unresolved_token_counts_as_zero() {
        let unresolved = Token::new(STABLE, 18);
        let volume = metrics().tracked_volume_usd(
            &bundle(),
            &bd("10"),
            &token(NATIVE, "1"),
            &bd("2000"),
            &unresolved,
        );
        assert_eq!(volume, bd("2000"));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let m = metrics();
        let t0 = token(NATIVE, "1");
        let t1 = token(STABLE, "0.0033");
        let a = m.tracked_volume_usd(&bundle(), &bd("7"), &t0, &bd("3"), &t1);
        let b = m.tracked_volume_usd(&bundle(), &bd("7"), &t0, &bd("3"), &t1);
        assert_eq!(a.to_string(), b.to_string());
    }
}
