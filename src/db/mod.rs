use alloy::primitives::Address;

use crate::db::models::{Bundle, Pair, Token};

pub mod memory;
pub mod models;

pub use memory::MemoryStore;

/// Storage collaborator consumed by the pricing core.
///
/// Lookups return owned snapshots; absence is an ordinary outcome and every
/// caller branches on it. The read side is all the resolver and calculators
/// touch, the write side is reserved for event handlers.
pub trait LiquidityStore {
    fn load_pair(&self, address: &Address) -> Option<Pair>;

    fn load_token(&self, address: &Address) -> Option<Token>;

    /// Factory `getPair` lookup. Argument order does not matter; returns
    /// [`Address::ZERO`] when no pool exists for the two tokens.
    fn get_pair_address(&self, token_a: &Address, token_b: &Address) -> Address;

    fn load_bundle(&self) -> Bundle;

    // ==================== WRITES ====================

    /// Record a pool in the factory index and persist its initial state.
    fn register_pair(&mut self, pair: Pair);

    fn save_pair(&mut self, pair: Pair);

    fn save_token(&mut self, token: Token);

    fn save_bundle(&mut self, bundle: Bundle);
}
