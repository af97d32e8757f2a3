//! Request bodies built on top of compiled expressions and ordered maps.
//!
//! Nothing here talks to a server; each builder only produces the bytes that
//! go into a request body.

mod admin;
mod bulk;
mod search;

pub use admin::{alias_set_body, alias_switch_body, aliases_body, index_create_body, AliasAction};
pub use bulk::{build_bulk_body, BulkOperation, BulkOperationType};
pub use search::{Pagination, SearchRequest, Sort, SortOrder};
