// crates/query/src/request/search.rs

use std::fmt::{self, Display, Formatter};

use tracing::debug;

use crate::error::Result;
use crate::expr::{Expr, ExprFlavour};
use crate::map::{OrderedMap, Value};

/// Offset and page size of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub from: u32,
    pub size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// A single sort clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    /// Parse an order-by column; a leading `-` means descending.
    /// Returns `None` for an empty column.
    pub fn parse(order_by: &str) -> Option<Self> {
        let (field, order) = match order_by.strip_prefix('-') {
            Some(rest) => (rest, SortOrder::Desc),
            None => (order_by, SortOrder::Asc),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            order,
        })
    }

    /// `{field: {"order": "asc"|"desc"}}`
    fn to_map(&self) -> OrderedMap {
        OrderedMap::with_capacity(1).with(
            self.field.as_str(),
            OrderedMap::with_capacity(1).with("order", self.order.to_string()),
        )
    }
}

/// Search request envelope: the compiled expression under `query.bool.must`,
/// plus optional sort and pagination.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    expr: Expr,
    sort: Option<Sort>,
    pagination: Option<Pagination>,
}

impl SearchRequest {
    pub fn new(expr: Expr) -> Self {
        Self {
            expr,
            sort: None,
            pagination: None,
        }
    }

    /// Order by `order_by`; `-field` sorts descending, empty means unsorted.
    pub fn sort(mut self, order_by: &str) -> Self {
        self.sort = Sort::parse(order_by);
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Build the request body.
    pub fn body(&self) -> Result<OrderedMap> {
        // `must` is always an array, so a single map becomes a one-element list.
        let must: Vec<Value> = self
            .expr
            .compile(ExprFlavour::SearchEngine)?
            .into_clauses()
            .into_iter()
            .map(Value::Map)
            .collect();
        debug!(clauses = must.len(), "building search request");

        let query = OrderedMap::with_capacity(1).with(
            "bool",
            OrderedMap::with_capacity(1).with("must", must),
        );

        let mut body = OrderedMap::with_capacity(4).with("query", query);
        if let Some(sort) = &self.sort {
            body.push("sort", vec![Value::Map(sort.to_map())]);
        }
        if let Some(p) = self.pagination {
            body.push("from", p.from);
            body.push("size", p.size);
        }
        Ok(body)
    }

    pub fn render(&self) -> Result<Vec<u8>> {
        Ok(self.body()?.render())
    }
}
