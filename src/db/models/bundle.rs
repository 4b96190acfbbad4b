use bigdecimal::BigDecimal;
use num_traits::Zero;

/// Process-wide pricing singleton.
///
/// Holds the USD price of the chain's native currency. Created once when
/// indexing starts and refreshed on every event that can move the rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub native_price_usd: BigDecimal,
}

impl Default for Bundle {
    fn default() -> Self {
        Self {
            native_price_usd: BigDecimal::zero(),
        }
    }
}
