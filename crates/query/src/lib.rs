//! Backend-agnostic filter expressions compiled into document-store filter
//! maps or search-engine query DSL, plus the ordered JSON encoder used to put
//! them on the wire.

#[macro_use]
mod macros;

pub mod error;
pub mod expr;
pub mod map;
pub mod request;

pub use error::{Error, Result};
pub use expr::{parse_filter, Compiled, Expr, ExprFlavour, Scalar};
pub use map::{KvPair, OrderedMap, Value};
pub use request::{
    alias_set_body, alias_switch_body, aliases_body, build_bulk_body, index_create_body,
    AliasAction, BulkOperation, BulkOperationType, Pagination, SearchRequest, Sort, SortOrder,
};
