mod bundle;
mod event;
mod pair;
mod token;

pub use bundle::Bundle;
pub use event::{PairEvent, PairEventKind};
pub use pair::Pair;
pub use token::Token;
