use crate::expr::ExprFlavour;
use crate::request::BulkOperationType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The node has no mapping in the requested flavour.
    #[error("unsupported operation: {node} cannot be compiled for {flavour}")]
    UnsupportedOperation {
        node: &'static str,
        flavour: ExprFlavour,
    },

    /// A composite node received a child result it cannot combine.
    /// Carries the offending value rendered as JSON.
    #[error("malformed expression: expected a single map, got {0}")]
    MalformedExpression(String),

    #[error("unknown value kind: {0}")]
    UnknownValueKind(String),

    #[error("unknown expression flavour: {0}")]
    UnknownFlavour(String),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("invalid operator: {0}")]
    InvalidOperator(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize {op} document {id}: {source}")]
    Document {
        op: BulkOperationType,
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    #[inline]
    pub fn unsupported(node: &'static str, flavour: ExprFlavour) -> Self {
        Error::UnsupportedOperation { node, flavour }
    }

    #[inline]
    pub fn invalid_filter(msg: impl Into<String>) -> Self {
        Error::InvalidFilter(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
