use alloy::primitives::Address;
use rustc_hash::FxHashMap;

use crate::db::{
    models::{Bundle, Pair, Token},
    LiquidityStore,
};

/// In-memory store backing a single replay.
///
/// Maps are only ever accessed by key; anything that lists records sorts by
/// address first so output never depends on hash iteration order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pairs: FxHashMap<Address, Pair>,
    tokens: FxHashMap<Address, Token>,
    /// Factory index: sorted (token0, token1) -> pair address
    pair_index: FxHashMap<(Address, Address), Address>,
    bundle: Bundle,
}

fn sorted(token_a: Address, token_b: Address) -> (Address, Address) {
    if token_a <= token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All tokens ordered by address.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut tokens: Vec<&Token> = self.tokens.values().collect();
        tokens.sort_by_key(|t| t.address);
        tokens
    }

    /// All pairs ordered by address.
    pub fn pairs(&self) -> Vec<&Pair> {
        let mut pairs: Vec<&Pair> = self.pairs.values().collect();
        pairs.sort_by_key(|p| p.address);
        pairs
    }
}

impl LiquidityStore for MemoryStore {
    fn load_pair(&self, address: &Address) -> Option<Pair> {
        self.pairs.get(address).cloned()
    }

    fn load_token(&self, address: &Address) -> Option<Token> {
        self.tokens.get(address).cloned()
    }

    fn get_pair_address(&self, token_a: &Address, token_b: &Address) -> Address {
        self.pair_index
            .get(&sorted(*token_a, *token_b))
            .copied()
            .unwrap_or(Address::ZERO)
    }

    fn load_bundle(&self) -> Bundle {
        self.bundle.clone()
    }

    fn register_pair(&mut self, pair: Pair) {
        self.pair_index
            .insert(sorted(pair.token0, pair.token1), pair.address);
        self.pairs.insert(pair.address, pair);
    }

    fn save_pair(&mut self, pair: Pair) {
        self.pairs.insert(pair.address, pair);
    }

    fn save_token(&mut self, token: Token) {
        self.tokens.insert(token.address, token);
    }

    fn save_bundle(&mut self, bundle: Bundle) {
        self.bundle = bundle;
    }
}
