use alloy::primitives::Address;
use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::utils::reserve_ratio;

/// Constant-product liquidity pool state.
///
/// Primary Key: address
/// Created on `PairCreated`, then mutated in place by every Sync/Swap/Mint/Burn.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    // Primary key
    pub address: Address,

    // Token pair (factory ordering: token0 < token1)
    pub token0: Address,
    pub token1: Address,

    // Reserves in token units (decimal adjusted)
    pub reserve0: BigDecimal,
    pub reserve1: BigDecimal,

    // Pool liquidity valued in native currency / USD
    pub reserve_native: BigDecimal,
    pub reserve_usd: BigDecimal,
    /// Native-valued liquidity counting whitelisted sides only.
    pub tracked_reserve_native: BigDecimal,

    // Computed prices (Uniswap style)
    // token0_price = token0 per token1 (reserve0 / reserve1)
    // token1_price = token1 per token0 (reserve1 / reserve0)
    pub token0_price: BigDecimal,
    pub token1_price: BigDecimal,

    // Lifetime stats
    pub volume_token0: BigDecimal,
    pub volume_token1: BigDecimal,
    pub volume_usd: BigDecimal,
    pub untracked_volume_usd: BigDecimal,
    pub tx_count: u64,
}

impl Pair {
    pub fn new(address: Address, token0: Address, token1: Address) -> Self {
        Self {
            address,
            token0,
            token1,
            reserve0: BigDecimal::zero(),
            reserve1: BigDecimal::zero(),
            reserve_native: BigDecimal::zero(),
            reserve_usd: BigDecimal::zero(),
            tracked_reserve_native: BigDecimal::zero(),
            token0_price: BigDecimal::zero(),
            token1_price: BigDecimal::zero(),
            volume_token0: BigDecimal::zero(),
            volume_token1: BigDecimal::zero(),
            volume_usd: BigDecimal::zero(),
            untracked_volume_usd: BigDecimal::zero(),
            tx_count: 0,
        }
    }

    /// Set reserves and recompute both instantaneous prices.
    ///
    /// A zero reserve on either side makes the price that divides by it zero.
    pub fn set_reserves(&mut self, reserve0: BigDecimal, reserve1: BigDecimal) {
        self.token0_price = reserve_ratio(&reserve0, &reserve1);
        self.token1_price = reserve_ratio(&reserve1, &reserve0);
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
    }

    /// The other token of the pair, or `None` if `token` is not in it.
    pub fn counterpart(&self, token: &Address) -> Option<Address> {
        if self.token0 == *token {
            Some(self.token1)
        } else if self.token1 == *token {
            Some(self.token0)
        } else {
            None
        }
    }

    /// Price of `token` quoted in units of the other token.
    ///
    /// token0 → token1_price (token1 per token0)
    /// token1 → token0_price (token0 per token1)
    pub fn price_of(&self, token: &Address) -> Option<&BigDecimal> {
        if self.token0 == *token {
            Some(&self.token1_price)
        } else if self.token1 == *token {
            Some(&self.token0_price)
        } else {
            None
        }
    }

    /// Reserve held on `token`'s side of the pool.
    pub fn reserve_of(&self, token: &Address) -> Option<&BigDecimal> {
        if self.token0 == *token {
            Some(&self.reserve0)
        } else if self.token1 == *token {
            Some(&self.reserve1)
        } else {
            None
        }
    }
}
