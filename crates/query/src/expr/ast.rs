// crates/query/src/expr/ast.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::map::Value;

mod sealed {
    pub trait Sealed {}
}

/// Value types a predicate may compare against.
///
/// Sealed: implemented exactly for the kinds the JSON encoder can render, so a
/// node can never hold something that has no wire form.
pub trait Scalar: Into<Value> + sealed::Sealed {}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}
            impl Scalar for $t {}
        )*
    };
}

impl_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    String,
    &str,
    Uuid,
    DateTime<Utc>,
    Value,
);

/// `ident == value`
#[derive(Debug, Clone, PartialEq)]
pub struct Eq {
    pub ident: String,
    pub value: Value,
}

impl Eq {
    pub fn new<T: Scalar>(ident: impl Into<String>, value: T) -> Self {
        Self {
            ident: ident.into(),
            value: value.into(),
        }
    }
}

/// `ident != value`
#[derive(Debug, Clone, PartialEq)]
pub struct Neq {
    pub ident: String,
    pub value: Value,
}

impl Neq {
    pub fn new<T: Scalar>(ident: impl Into<String>, value: T) -> Self {
        Self {
            ident: ident.into(),
            value: value.into(),
        }
    }
}

/// Full-text match.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub ident: String,
    pub text: String,
}

/// Case-insensitive substring match; `text` is split on spaces and every
/// token must match.
#[derive(Debug, Clone, PartialEq)]
pub struct Wildcard {
    pub ident: String,
    pub text: String,
}

/// `ident` is one of `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct Terms {
    pub ident: String,
    pub values: Vec<Value>,
}

impl Terms {
    pub fn new<T, I>(ident: impl Into<String>, values: I) -> Self
    where
        T: Scalar,
        I: IntoIterator<Item = T>,
    {
        Self {
            ident: ident.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Range predicate. Either bound may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub ident: String,
    pub from: Option<Value>,
    pub from_inclusive: bool,
    pub to: Option<Value>,
    pub to_inclusive: bool,
}

impl Interval {
    /// Both bounds share the type `T`.
    pub fn new<T: Scalar>(
        ident: impl Into<String>,
        from: Option<T>,
        from_inclusive: bool,
        to: Option<T>,
        to_inclusive: bool,
    ) -> Self {
        Self {
            ident: ident.into(),
            from: from.map(Into::into),
            from_inclusive,
            to: to.map(Into::into),
            to_inclusive,
        }
    }
}

/// Conjunction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct And {
    pub exprs: Vec<Expr>,
}

/// A boolean filter expression.
///
/// The variant set is closed: compilation matches on it exhaustively, so a new
/// node kind cannot be added without deciding its shape in every flavour.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Eq(Eq),
    Neq(Neq),
    Match(Match),
    Wildcard(Wildcard),
    Terms(Terms),
    Interval(Interval),
    And(And),
}

impl Expr {
    pub fn equals<T: Scalar>(ident: impl Into<String>, value: T) -> Self {
        Expr::Eq(Eq::new(ident, value))
    }

    pub fn not_equals<T: Scalar>(ident: impl Into<String>, value: T) -> Self {
        Expr::Neq(Neq::new(ident, value))
    }

    pub fn text_match(ident: impl Into<String>, text: impl Into<String>) -> Self {
        Expr::Match(Match {
            ident: ident.into(),
            text: text.into(),
        })
    }

    pub fn wildcard(ident: impl Into<String>, text: impl Into<String>) -> Self {
        Expr::Wildcard(Wildcard {
            ident: ident.into(),
            text: text.into(),
        })
    }

    pub fn terms<T, I>(ident: impl Into<String>, values: I) -> Self
    where
        T: Scalar,
        I: IntoIterator<Item = T>,
    {
        Expr::Terms(Terms::new(ident, values))
    }

    pub fn interval<T: Scalar>(
        ident: impl Into<String>,
        from: Option<T>,
        from_inclusive: bool,
        to: Option<T>,
        to_inclusive: bool,
    ) -> Self {
        Expr::Interval(Interval::new(ident, from, from_inclusive, to, to_inclusive))
    }

    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::And(And {
            exprs: exprs.into_iter().collect(),
        })
    }

    /// Node name as used in error messages.
    pub fn node_name(&self) -> &'static str {
        match self {
            Expr::Eq(_) => "Eq",
            Expr::Neq(_) => "Neq",
            Expr::Match(_) => "Match",
            Expr::Wildcard(_) => "Wildcard",
            Expr::Terms(_) => "Terms",
            Expr::Interval(_) => "Interval",
            Expr::And(_) => "And",
        }
    }

    /// All field identifiers referenced by the expression, in traversal
    /// order. Duplicates are kept.
    pub fn idents(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_idents(&mut out);
        out
    }

    fn collect_idents<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Eq(e) => out.push(&e.ident),
            Expr::Neq(e) => out.push(&e.ident),
            Expr::Match(e) => out.push(&e.ident),
            Expr::Wildcard(e) => out.push(&e.ident),
            Expr::Terms(e) => out.push(&e.ident),
            Expr::Interval(e) => out.push(&e.ident),
            Expr::And(e) => {
                for child in &e.exprs {
                    child.collect_idents(out);
                }
            }
        }
    }
}

macro_rules! impl_from_node {
    ($($node:ident),*) => {
        $(
            impl From<$node> for Expr {
                fn from(node: $node) -> Self {
                    Expr::$node(node)
                }
            }
        )*
    };
}

impl_from_node!(Eq, Neq, Match, Wildcard, Terms, Interval, And);
