use std::sync::Arc;

use alloy::primitives::Address;
use log::{debug, info, warn};

use crate::{
    config::PricingConfig,
    db::{
        models::{Pair, PairEvent, PairEventKind, Token},
        LiquidityStore,
    },
    utils::{half, parse_address, raw_amount_to_decimal, safe_div},
    worker::{
        native_price::NativePriceOracle, price_resolver::PriceResolver, tracked::TrackedMetrics,
    },
};

/// Interval (in events) between replay progress logs.
const PROGRESS_LOG_INTERVAL: usize = 10_000;

/// Applies decoded pair events to a store, one at a time and in order.
///
/// - PairCreated: registers the pair and any unseen tokens
/// - Sync: updates reserves, then token prices, the native/USD rate, and
///   pair liquidity
/// - Swap: accumulates tracked and untracked volume
/// - Mint/Burn: counts transactions
///
/// Events that reference unknown pairs or tokens are skipped with a warning;
/// nothing here aborts a replay.
pub struct PairIndexer<S: LiquidityStore> {
    store: S,
    resolver: PriceResolver,
    oracle: NativePriceOracle,
    metrics: TrackedMetrics,
}

impl<S: LiquidityStore> PairIndexer<S> {
    pub fn new(config: Arc<PricingConfig>, store: S) -> Self {
        Self {
            store,
            resolver: PriceResolver::new(config.clone()),
            oracle: NativePriceOracle::new(config.clone()),
            metrics: TrackedMetrics::new(config),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn oracle(&self) -> &NativePriceOracle {
        &self.oracle
    }

    /// Apply every event in order.
    pub fn replay(&mut self, events: &[PairEvent]) {
        for (i, event) in events.iter().enumerate() {
            self.handle(event);

            if (i + 1) % PROGRESS_LOG_INTERVAL == 0 {
                info!("Replayed {}/{} events (block {})", i + 1, events.len(), event.block_number);
            }
        }
    }

    pub fn handle(&mut self, event: &PairEvent) {
        let Some(pair_address) = parse_address(&event.pair) else {
            warn!(
                "Skipping {} at block {}: invalid pair address {:?}",
                event.kind.name(),
                event.block_number,
                event.pair
            );
            return;
        };

        debug!(
            "Handling {} for pair {} (block {}, log {})",
            event.kind.name(),
            pair_address,
            event.block_number,
            event.log_index
        );

        match &event.kind {
            PairEventKind::PairCreated {
                token0,
                token1,
                decimals0,
                decimals1,
            } => self.handle_pair_created(pair_address, token0, *decimals0, token1, *decimals1),
            PairEventKind::Sync { reserve0, reserve1 } => {
                self.handle_sync(pair_address, reserve0, reserve1)
            },
            PairEventKind::Swap {
                amount0_in,
                amount1_in,
                amount0_out,
                amount1_out,
            } => self.handle_swap(pair_address, amount0_in, amount1_in, amount0_out, amount1_out),
            PairEventKind::Mint { amount0, amount1 } | PairEventKind::Burn { amount0, amount1 } => {
                self.handle_liquidity(pair_address, event.kind.name(), amount0, amount1)
            },
        }
    }

    fn handle_pair_created(
        &mut self,
        pair_address: Address,
        token0: &str,
        decimals0: u8,
        token1: &str,
        decimals1: u8,
    ) {
        let (Some(token0), Some(token1)) = (parse_address(token0), parse_address(token1)) else {
            warn!("Skipping pair {}: invalid token address", pair_address);
            return;
        };

        if self.store.load_pair(&pair_address).is_some() {
            warn!("Pair {} already registered", pair_address);
            return;
        }

        for (token, decimals) in [(token0, decimals0), (token1, decimals1)] {
            if self.store.load_token(&token).is_none() {
                self.store.save_token(Token::new(token, decimals));
            }
        }

        self.store.register_pair(Pair::new(pair_address, token0, token1));
        info!("Registered pair {} ({} / {})", pair_address, token0, token1);
    }

    /// Load a pair and both of its tokens.
    fn load_pair_with_tokens(&self, pair_address: &Address) -> Option<(Pair, Token, Token)> {
        let Some(pair) = self.store.load_pair(pair_address) else {
            warn!("Event for unknown pair {}", pair_address);
            return None;
        };

        let (Some(token0), Some(token1)) =
            (self.store.load_token(&pair.token0), self.store.load_token(&pair.token1))
        else {
            warn!("Pair {} references unindexed tokens", pair_address);
            return None;
        };

        Some((pair, token0, token1))
    }

    fn handle_sync(&mut self, pair_address: Address, reserve0: &str, reserve1: &str) {
        let Some((mut pair, mut token0, mut token1)) = self.load_pair_with_tokens(&pair_address)
        else {
            return;
        };

        // Take the old reserves out of each token's total liquidity
        token0.total_liquidity = &token0.total_liquidity - &pair.reserve0;
        token1.total_liquidity = &token1.total_liquidity - &pair.reserve1;

        pair.set_reserves(
            raw_amount_to_decimal(reserve0, token0.decimals),
            raw_amount_to_decimal(reserve1, token1.decimals),
        );
        self.store.save_pair(pair.clone());

        // Resolve against the updated reserves
        let derived0 = self.resolver.find_native_per_token(&self.store, &token0.address);
        let derived1 = self.resolver.find_native_per_token(&self.store, &token1.address);
        token0.derived_native = Some(derived0);
        token1.derived_native = Some(derived1);

        let mut bundle = self.store.load_bundle();
        bundle.native_price_usd = self.oracle.native_price_in_usd(&self.store);
        self.store.save_bundle(bundle.clone());

        let tracked_liquidity_usd = self.metrics.tracked_liquidity_usd(
            &bundle,
            &pair.reserve0,
            &token0,
            &pair.reserve1,
            &token1,
        );
        pair.tracked_reserve_native = safe_div(&tracked_liquidity_usd, &bundle.native_price_usd);

        pair.reserve_native = &pair.reserve0 * token0.derived_native_or_zero()
            + &pair.reserve1 * token1.derived_native_or_zero();
        pair.reserve_usd = &pair.reserve_native * &bundle.native_price_usd;

        // Put the new reserves back
        token0.total_liquidity = &token0.total_liquidity + &pair.reserve0;
        token1.total_liquidity = &token1.total_liquidity + &pair.reserve1;

        debug!(
            "Pair {} synced: reserve_native={} native_price_usd={}",
            pair.address, pair.reserve_native, bundle.native_price_usd
        );

        self.store.save_pair(pair);
        self.store.save_token(token0);
        self.store.save_token(token1);
    }

    fn handle_swap(
        &mut self,
        pair_address: Address,
        amount0_in: &str,
        amount1_in: &str,
        amount0_out: &str,
        amount1_out: &str,
    ) {
        let Some((mut pair, mut token0, mut token1)) = self.load_pair_with_tokens(&pair_address)
        else {
            return;
        };

        let amount0_total = raw_amount_to_decimal(amount0_in, token0.decimals)
            + raw_amount_to_decimal(amount0_out, token0.decimals);
        let amount1_total = raw_amount_to_decimal(amount1_in, token1.decimals)
            + raw_amount_to_decimal(amount1_out, token1.decimals);

        let bundle = self.store.load_bundle();

        // Untracked: both legs at derived prices, averaged
        let derived_amount_native = half(
            &(&amount0_total * token0.derived_native_or_zero()
                + &amount1_total * token1.derived_native_or_zero()),
        );
        let derived_amount_usd = &derived_amount_native * &bundle.native_price_usd;

        let tracked_amount_usd = self.metrics.tracked_volume_usd(
            &bundle,
            &amount0_total,
            &token0,
            &amount1_total,
            &token1,
        );

        token0.trade_volume = &token0.trade_volume + &amount0_total;
        token0.trade_volume_usd = &token0.trade_volume_usd + &tracked_amount_usd;
        token0.untracked_volume_usd = &token0.untracked_volume_usd + &derived_amount_usd;
        token0.tx_count += 1;

        token1.trade_volume = &token1.trade_volume + &amount1_total;
        token1.trade_volume_usd = &token1.trade_volume_usd + &tracked_amount_usd;
        token1.untracked_volume_usd = &token1.untracked_volume_usd + &derived_amount_usd;
        token1.tx_count += 1;

        pair.volume_token0 = &pair.volume_token0 + &amount0_total;
        pair.volume_token1 = &pair.volume_token1 + &amount1_total;
        pair.volume_usd = &pair.volume_usd + &tracked_amount_usd;
        pair.untracked_volume_usd = &pair.untracked_volume_usd + &derived_amount_usd;
        pair.tx_count += 1;

        debug!(
            "Swap on {}: tracked_usd={} untracked_usd={}",
            pair.address, tracked_amount_usd, derived_amount_usd
        );

        self.store.save_pair(pair);
        self.store.save_token(token0);
        self.store.save_token(token1);
    }

    fn handle_liquidity(&mut self, pair_address: Address, kind: &str, amount0: &str, amount1: &str) {
        let Some((mut pair, mut token0, mut token1)) = self.load_pair_with_tokens(&pair_address)
        else {
            return;
        };

        token0.tx_count += 1;
        token1.tx_count += 1;
        pair.tx_count += 1;

        debug!("{} on {}: raw amounts {} / {}", kind, pair.address, amount0, amount1);

        self.store.save_pair(pair);
        self.store.save_token(token0);
        self.store.save_token(token1);
    }
}
