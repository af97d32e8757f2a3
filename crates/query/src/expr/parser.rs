// crates/query/src/expr/parser.rs

use serde_json::Value as Json;

use super::ast::{Expr, Interval, Match, Wildcard};
use crate::error::{Error, Result};
use crate::map::Value;

/// Parse a Mongo-style JSON filter into an [`Expr`].
///
/// ```text
/// { "kind": "post",
///   "views": { "$gte": 10, "$lt": 100 },
///   "title": { "$wildcard": "rust cms" },
///   "$and": [ { "tags": { "$in": ["a", "b"] } } ] }
/// ```
///
/// Entries become an `And` in document order; a single entry is returned
/// as-is and an empty object is an empty `And`.
///
/// Every field may be constrained by one predicate only. Range operators on a
/// field collapse into a single interval; any other repetition, within one
/// operator object or across `$and` branches, is `InvalidFilter`.
pub fn parse_filter(json: &Json) -> Result<Expr> {
    let expr = parse_object(json)?;
    reject_repeated_fields(&expr)?;
    Ok(expr)
}

fn parse_object(json: &Json) -> Result<Expr> {
    match json {
        Json::Object(map) => {
            let mut exprs = Vec::with_capacity(map.len());

            for (k, v) in map {
                if k == "$and" {
                    exprs.push(parse_and(v)?);
                } else if k.starts_with('$') {
                    return Err(Error::InvalidOperator(format!(
                        "unsupported top-level operator {}",
                        k
                    )));
                } else {
                    exprs.push(parse_field_expr(k, v)?);
                }
            }

            if exprs.len() == 1 {
                Ok(exprs.remove(0))
            } else {
                Ok(Expr::and(exprs))
            }
        }
        _ => Err(Error::invalid_filter("top-level filter must be an object")),
    }
}

fn reject_repeated_fields(expr: &Expr) -> Result<()> {
    let idents = expr.idents();
    for (i, ident) in idents.iter().enumerate() {
        if idents[..i].contains(ident) {
            return Err(Error::invalid_filter(format!(
                "field {} is constrained more than once",
                ident
            )));
        }
    }
    Ok(())
}

fn parse_and(value: &Json) -> Result<Expr> {
    match value {
        Json::Array(arr) => {
            let exprs = arr.iter().map(parse_object).collect::<Result<Vec<_>>>()?;
            Ok(Expr::and(exprs))
        }
        _ => Err(Error::invalid_filter("$and value must be an array")),
    }
}

fn parse_field_expr(path: &str, v: &Json) -> Result<Expr> {
    // Shorthand: { field: value } → Eq
    let obj = match v {
        Json::Object(obj) => obj,
        _ => return Ok(Expr::equals(path, Value::try_from(v)?)),
    };

    if obj.is_empty() {
        return Err(Error::invalid_filter(format!(
            "empty operator object for field {}",
            path
        )));
    }

    let mut exprs: Vec<Expr> = Vec::with_capacity(obj.len());
    // Index into `exprs` of the interval collecting range operators.
    let mut interval: Option<usize> = None;

    for (op_name, op_val) in obj {
        match op_name.as_str() {
            "$gt" | "$gte" | "$lt" | "$lte" => {
                let idx = *interval.get_or_insert_with(|| {
                    exprs.push(Expr::Interval(Interval::new::<Value>(
                        path, None, false, None, false,
                    )));
                    exprs.len() - 1
                });
                if let Expr::Interval(range) = &mut exprs[idx] {
                    set_bound(range, op_name, op_val)?;
                }
            }
            _ => exprs.push(parse_cmp_op(path, op_name, op_val)?),
        }
    }

    if exprs.len() == 1 {
        Ok(exprs.remove(0))
    } else {
        Ok(Expr::and(exprs))
    }
}

fn set_bound(range: &mut Interval, op_name: &str, value: &Json) -> Result<()> {
    let lower = matches!(op_name, "$gt" | "$gte");
    let inclusive = matches!(op_name, "$gte" | "$lte");

    let (slot, flag) = if lower {
        (&mut range.from, &mut range.from_inclusive)
    } else {
        (&mut range.to, &mut range.to_inclusive)
    };

    if slot.is_some() {
        return Err(Error::invalid_filter(format!(
            "field {} has more than one {} bound",
            range.ident,
            if lower { "lower" } else { "upper" }
        )));
    }

    *slot = Some(Value::try_from(value)?);
    *flag = inclusive;
    Ok(())
}

fn parse_cmp_op(path: &str, op_name: &str, value: &Json) -> Result<Expr> {
    match op_name {
        "$eq" => Ok(Expr::equals(path, Value::try_from(value)?)),
        "$ne" => Ok(Expr::not_equals(path, Value::try_from(value)?)),
        "$in" => {
            let arr = value
                .as_array()
                .ok_or_else(|| Error::invalid_filter("$in expects array"))?;
            let values = arr
                .iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>>>()?;
            Ok(Expr::terms(path, values))
        }
        "$match" => Ok(Expr::Match(Match {
            ident: path.to_string(),
            text: expect_str(op_name, value)?,
        })),
        "$wildcard" => Ok(Expr::Wildcard(Wildcard {
            ident: path.to_string(),
            text: expect_str(op_name, value)?,
        })),
        other => Err(Error::InvalidOperator(other.to_string())),
    }
}

fn expect_str(op_name: &str, value: &Json) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_filter(format!("{} expects string", op_name)))
}
