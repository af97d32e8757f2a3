mod encode;
mod ordered;
mod value;

pub use ordered::{KvPair, OrderedMap};
pub use value::Value;
