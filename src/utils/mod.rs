//! Utility functions for the pricing core.
//!
//! - [`conversion`] - Raw amount, address and decimal string parsing
//! - [`decimal`] - Zero-safe division with fixed rounding

mod conversion;
mod decimal;

// ============================================
// Re-exports
// ============================================

// Conversion utilities
pub use conversion::{parse_address, parse_decimal, raw_amount_to_decimal, u256_to_decimal};

// Decimal arithmetic
pub use decimal::{double, half, reserve_ratio, safe_div, DIVISION_PRECISION};
