use serde::Deserialize;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::Error;

/// The query representation an expression is compiled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ExprFlavour {
    /// Document-store filter map with implicit equality and `$`-range operators.
    DocStore,
    /// Search-engine query DSL (`term`, `match`, `range`, `bool`, ...).
    SearchEngine,
}

impl Display for ExprFlavour {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExprFlavour::DocStore => f.write_str("DocStore"),
            ExprFlavour::SearchEngine => f.write_str("SearchEngine"),
        }
    }
}

impl FromStr for ExprFlavour {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doc_store" | "doc-store" | "docstore" | "docdb" => Ok(ExprFlavour::DocStore),
            "search_engine" | "search-engine" | "searchengine" | "opensearch" => {
                Ok(ExprFlavour::SearchEngine)
            }
            _ => Err(Error::UnknownFlavour(s.to_string())),
        }
    }
}

impl TryFrom<String> for ExprFlavour {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
