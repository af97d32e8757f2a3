pub mod ast;
pub mod compile;
pub mod flavour;
pub mod parser;

pub use ast::{And, Eq, Expr, Interval, Match, Neq, Scalar, Terms, Wildcard};
pub use compile::Compiled;
pub use flavour::ExprFlavour;
pub use parser::parse_filter;
