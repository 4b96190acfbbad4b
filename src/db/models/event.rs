use serde::Deserialize;

/// A decoded constant-product pair event, in chain order.
///
/// Addresses and raw amounts are kept as the decoder emits them (hex strings
/// and base-10 integer strings); the indexer parses and scales them against
/// the token's decimals.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PairEvent {
    pub block_number: u64,
    #[serde(default)]
    pub log_index: u32,
    pub pair: String,
    #[serde(flatten)]
    pub kind: PairEventKind,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PairEventKind {
    PairCreated {
        token0: String,
        token1: String,
        #[serde(default = "default_decimals")]
        decimals0: u8,
        #[serde(default = "default_decimals")]
        decimals1: u8,
    },
    Sync {
        reserve0: String,
        reserve1: String,
    },
    Swap {
        amount0_in: String,
        amount1_in: String,
        amount0_out: String,
        amount1_out: String,
    },
    Mint {
        amount0: String,
        amount1: String,
    },
    Burn {
        amount0: String,
        amount1: String,
    },
}

fn default_decimals() -> u8 {
    18
}

impl PairEventKind {
    pub fn name(&self) -> &'static str {
        match self {
            PairEventKind::PairCreated { .. } => "pair_created",
            PairEventKind::Sync { .. } => "sync",
            PairEventKind::Swap { .. } => "swap",
            PairEventKind::Mint { .. } => "mint",
            PairEventKind::Burn { .. } => "burn",
        }
    }
}
