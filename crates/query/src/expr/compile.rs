// crates/query/src/expr/compile.rs

use tracing::{debug, trace};

use super::ast::{And, Eq, Expr, Interval, Match, Neq, Terms, Wildcard};
use super::flavour::ExprFlavour;
use crate::error::{Error, Result};
use crate::map::{OrderedMap, Value};

/// Output of compiling an expression: a single map, or a sequence of maps
/// that the caller treats as an implicit conjunction.
#[derive(Debug, Clone, PartialEq)]
pub enum Compiled {
    Map(OrderedMap),
    Seq(Vec<OrderedMap>),
}

impl Compiled {
    pub fn as_map(&self) -> Option<&OrderedMap> {
        match self {
            Compiled::Map(m) => Some(m),
            Compiled::Seq(_) => None,
        }
    }

    pub fn into_map(self) -> Option<OrderedMap> {
        match self {
            Compiled::Map(m) => Some(m),
            Compiled::Seq(_) => None,
        }
    }

    /// The result as a list of clauses; a single map becomes a one-element list.
    pub fn into_clauses(self) -> Vec<OrderedMap> {
        match self {
            Compiled::Map(m) => vec![m],
            Compiled::Seq(seq) => seq,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Compiled::Map(m) => Value::Map(m),
            Compiled::Seq(seq) => Value::List(seq.into_iter().map(Value::Map).collect()),
        }
    }

    /// JSON bytes: an object for `Map`, an array of objects for `Seq`.
    pub fn render(&self) -> Vec<u8> {
        match self {
            Compiled::Map(m) => m.render(),
            Compiled::Seq(seq) => {
                let mut buf = Vec::with_capacity(100 * seq.len().max(1));
                buf.push(b'[');
                for (i, m) in seq.iter().enumerate() {
                    if i > 0 {
                        buf.push(b',');
                    }
                    m.append_json(&mut buf);
                }
                buf.push(b']');
                buf
            }
        }
    }

    pub fn to_json_string(&self) -> String {
        String::from_utf8_lossy(&self.render()).into_owned()
    }
}

impl Expr {
    /// Compile the expression into the native shape of `flavour`.
    pub fn compile(&self, flavour: ExprFlavour) -> Result<Compiled> {
        trace!(node = self.node_name(), %flavour, "compiling expression");

        let out = match self {
            Expr::Eq(e) => compile_eq(e, flavour),
            Expr::Neq(e) => compile_neq(e, flavour),
            Expr::Match(e) => compile_match(e, flavour),
            Expr::Wildcard(e) => compile_wildcard(e, flavour),
            Expr::Terms(e) => compile_terms(e, flavour),
            Expr::Interval(e) => compile_interval(e, flavour),
            Expr::And(e) => compile_and(e, flavour),
        };

        if let Err(Error::UnsupportedOperation { node, flavour }) = &out {
            debug!(node, %flavour, "expression has no mapping for flavour");
        }
        out
    }
}

/// `{key: inner}`
fn wrap(key: &str, inner: OrderedMap) -> OrderedMap {
    OrderedMap::with_capacity(1).with(key, inner)
}

fn single(ident: &str, value: Value) -> OrderedMap {
    OrderedMap::with_capacity(1).with(ident, value)
}

fn compile_eq(e: &Eq, flavour: ExprFlavour) -> Result<Compiled> {
    let pair = single(&e.ident, e.value.clone());
    Ok(Compiled::Map(match flavour {
        ExprFlavour::DocStore => pair,
        ExprFlavour::SearchEngine => wrap("term", pair),
    }))
}

fn compile_neq(e: &Neq, flavour: ExprFlavour) -> Result<Compiled> {
    match flavour {
        ExprFlavour::DocStore => Err(Error::unsupported("Neq", flavour)),
        ExprFlavour::SearchEngine => {
            let term = wrap("term", single(&e.ident, e.value.clone()));
            Ok(Compiled::Map(wrap("bool", wrap("must_not", term))))
        }
    }
}

fn compile_match(e: &Match, flavour: ExprFlavour) -> Result<Compiled> {
    match flavour {
        ExprFlavour::DocStore => Err(Error::unsupported("Match", flavour)),
        ExprFlavour::SearchEngine => Ok(Compiled::Map(wrap(
            "match",
            single(&e.ident, Value::String(e.text.clone())),
        ))),
    }
}

fn compile_terms(e: &Terms, flavour: ExprFlavour) -> Result<Compiled> {
    match flavour {
        ExprFlavour::DocStore => Err(Error::unsupported("Terms", flavour)),
        ExprFlavour::SearchEngine => Ok(Compiled::Map(wrap(
            "terms",
            single(&e.ident, Value::List(e.values.clone())),
        ))),
    }
}

/// One clause per space-separated token. Always a sequence, even for a single
/// token; text without tokens yields an empty sequence.
fn compile_wildcard(e: &Wildcard, flavour: ExprFlavour) -> Result<Compiled> {
    match flavour {
        ExprFlavour::DocStore => Err(Error::unsupported("Wildcard", flavour)),
        ExprFlavour::SearchEngine => {
            let clauses = e
                .text
                .split(' ')
                .filter(|part| !part.is_empty())
                .map(|part| {
                    let pattern = OrderedMap::with_capacity(2)
                        .with("value", format!("*{}*", part))
                        .with("case_insensitive", true);
                    wrap("wildcard", wrap(&e.ident, pattern))
                })
                .collect();
            Ok(Compiled::Seq(clauses))
        }
    }
}

fn compile_interval(e: &Interval, flavour: ExprFlavour) -> Result<Compiled> {
    let (gte, gt, lte, lt) = match flavour {
        ExprFlavour::DocStore => ("$gte", "$gt", "$lte", "$lt"),
        ExprFlavour::SearchEngine => ("gte", "gt", "lte", "lt"),
    };

    let mut conds = OrderedMap::with_capacity(2);
    if let Some(from) = &e.from {
        conds.push(if e.from_inclusive { gte } else { gt }, from.clone());
    }
    if let Some(to) = &e.to {
        conds.push(if e.to_inclusive { lte } else { lt }, to.clone());
    }

    let field = wrap(&e.ident, conds);
    Ok(Compiled::Map(match flavour {
        ExprFlavour::DocStore => field,
        ExprFlavour::SearchEngine => wrap("range", field),
    }))
}

fn compile_and(e: &And, flavour: ExprFlavour) -> Result<Compiled> {
    let children = e
        .exprs
        .iter()
        .map(|child| child.compile(flavour))
        .collect::<Result<Vec<_>>>()?;

    match flavour {
        ExprFlavour::DocStore => merge_maps(children).map(Compiled::Map),
        ExprFlavour::SearchEngine => Ok(Compiled::Seq(flatten(children))),
    }
}

/// Concatenate the pairs of every child map, in child order.
fn merge_maps(children: Vec<Compiled>) -> Result<OrderedMap> {
    let mut merged = OrderedMap::with_capacity(children.len());
    for child in children {
        match child {
            Compiled::Map(m) => merged.append(m),
            seq @ Compiled::Seq(_) => {
                return Err(Error::MalformedExpression(seq.to_json_string()));
            }
        }
    }
    Ok(merged)
}

fn flatten(children: Vec<Compiled>) -> Vec<OrderedMap> {
    let mut clauses = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Compiled::Map(m) => clauses.push(m),
            Compiled::Seq(seq) => clauses.extend(seq),
        }
    }
    clauses
}
