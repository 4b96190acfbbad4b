use alloy::primitives::Address;
use bigdecimal::BigDecimal;
use num_traits::Zero;

/// Token metadata and current pricing state.
///
/// Primary Key: address
/// Created by the ingestion layer the first time a pair references it, then
/// mutated in place by every event touching one of its pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    // Primary key
    pub address: Address,

    // On-chain metadata (immutable after creation)
    pub decimals: u8,

    /// Price in native-currency units. `None` until first resolved.
    pub derived_native: Option<BigDecimal>,

    // Lifetime stats
    pub trade_volume: BigDecimal,
    pub trade_volume_usd: BigDecimal,
    pub untracked_volume_usd: BigDecimal,
    pub tx_count: u64,

    /// Sum of this token's reserves across all pairs.
    pub total_liquidity: BigDecimal,
}

impl Token {
    pub fn new(address: Address, decimals: u8) -> Self {
        Self {
            address,
            decimals,
            derived_native: None,
            trade_volume: BigDecimal::zero(),
            trade_volume_usd: BigDecimal::zero(),
            untracked_volume_usd: BigDecimal::zero(),
            tx_count: 0,
            total_liquidity: BigDecimal::zero(),
        }
    }

    /// Derived native price, with an unresolved token counting as zero.
    pub fn derived_native_or_zero(&self) -> BigDecimal {
        self.derived_native.clone().unwrap_or_else(BigDecimal::zero)
    }
}
