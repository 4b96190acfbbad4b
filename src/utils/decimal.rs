//! Zero-safe decimal arithmetic.
//!
//! Every division performed by the pricing core goes through this module. A
//! zero (or otherwise unusable) divisor yields zero instead of a fault, and
//! every quotient is rounded half-even to [`DIVISION_PRECISION`] significant
//! digits so a replay reproduces results bit-for-bit.
//!
//! The quotient itself comes from `bigdecimal`'s `/`, which works at the
//! crate's default precision (100 digits unless `RUST_BIGDECIMAL_DEFAULT_PRECISION`
//! is set at build time). That precision must stay above [`DIVISION_PRECISION`].

use std::num::NonZeroU64;

use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::{Signed, Zero};
use once_cell::sync::Lazy;

/// Significant digits kept by every division (half-even rounding).
pub const DIVISION_PRECISION: u64 = 34;

const PRECISION: NonZeroU64 = match NonZeroU64::new(DIVISION_PRECISION) {
    Some(precision) => precision,
    None => panic!("division precision must be non-zero"),
};

pub(crate) static TWO_BD: Lazy<BigDecimal> = Lazy::new(|| BigDecimal::from(2));

/// `numerator / denominator`, or zero when the denominator is zero.
pub fn safe_div(numerator: &BigDecimal, denominator: &BigDecimal) -> BigDecimal {
    if denominator.is_zero() {
        return BigDecimal::zero();
    }
    (numerator / denominator).with_precision_round(PRECISION, RoundingMode::HalfEven)
}

/// Ratio of two pool reserves.
///
/// Reserves are never negative on-chain; a negative value here is upstream
/// corruption and, like a zero divisor, degrades to zero.
pub fn reserve_ratio(numerator: &BigDecimal, denominator: &BigDecimal) -> BigDecimal {
    if numerator.is_negative() || !denominator.is_positive() {
        return BigDecimal::zero();
    }
    safe_div(numerator, denominator)
}

#[inline]
pub fn half(value: &BigDecimal) -> BigDecimal {
    safe_div(value, &TWO_BD)
}

#[inline]
pub fn double(value: &BigDecimal) -> BigDecimal {
    value * &*TWO_BD
}
