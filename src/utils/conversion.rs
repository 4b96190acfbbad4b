//! Type conversion utilities.
//!
//! Functions for turning raw on-chain integers and configuration strings into
//! [`BigDecimal`] token amounts with exact decimal handling.

use alloy::primitives::{Address, U256};
use bigdecimal::BigDecimal;
use log::warn;
use num_bigint::BigInt;
use num_traits::Zero;
use std::str::FromStr;

// ============================================
// Raw Amount Conversions
// ============================================

/// Convert a raw U256 amount into token units by dividing by `10^decimals`.
///
/// The division by a power of ten is exact, so no rounding happens here.
pub fn u256_to_decimal(value: U256, decimals: u8) -> BigDecimal {
    // Convert U256 to BigDecimal via bytes (faster than string parsing)
    let bytes: [u8; 32] = value.to_le_bytes();
    let big_int = BigInt::from_bytes_le(num_bigint::Sign::Plus, &bytes);

    BigDecimal::new(big_int, i64::from(decimals))
}

/// Parse a raw integer amount (decimal string, as emitted by the decoder) into
/// token units.
///
/// Returns zero for malformed input; a bad amount never aborts a replay.
pub fn raw_amount_to_decimal(raw: &str, decimals: u8) -> BigDecimal {
    match U256::from_str(raw.trim()) {
        Ok(value) => u256_to_decimal(value, decimals),
        Err(e) => {
            warn!("Unparseable raw amount {:?}: {}", raw, e);
            BigDecimal::zero()
        },
    }
}

/// Parse a decimal string such as `"0"` or `"1.5"`.
pub fn parse_decimal(value: &str) -> Option<BigDecimal> {
    BigDecimal::from_str(value.trim()).ok()
}

/// Parse a hex address, accepting any letter case.
pub fn parse_address(value: &str) -> Option<Address> {
    Address::from_str(value.trim()).ok()
}
