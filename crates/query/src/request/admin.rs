// crates/query/src/request/admin.rs

use serde::Serialize;
use serde_json::Value as Json;

use crate::error::Result;
use crate::map::{OrderedMap, Value};

#[derive(Serialize)]
struct IndexCreateBody<'a> {
    settings: &'a Json,
    #[serde(skip_serializing_if = "Option::is_none")]
    mappings: Option<&'a Json>,
}

/// `{"settings": settings, "mappings": mappings}`; mappings are omitted when
/// absent. Both are written through unchanged, `null` members and number
/// forms included.
pub fn index_create_body(settings: &Json, mappings: Option<&Json>) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&IndexCreateBody { settings, mappings })?)
}

/// One entry of an aliases request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasAction {
    Add { index: String, alias: String },
    Remove { index: String, alias: String },
}

impl AliasAction {
    fn to_map(&self) -> OrderedMap {
        let (name, index, alias) = match self {
            AliasAction::Add { index, alias } => ("add", index, alias),
            AliasAction::Remove { index, alias } => ("remove", index, alias),
        };
        OrderedMap::with_capacity(1).with(
            name,
            OrderedMap::with_capacity(2)
                .with("index", index.as_str())
                .with("alias", alias.as_str()),
        )
    }
}

/// `{"actions": [...]}`
pub fn aliases_body(actions: &[AliasAction]) -> OrderedMap {
    let actions: Vec<Value> = actions.iter().map(|a| Value::Map(a.to_map())).collect();
    OrderedMap::with_capacity(1).with("actions", actions)
}

/// Point `alias` at `index`.
pub fn alias_set_body(index: &str, alias: &str) -> OrderedMap {
    aliases_body(&[AliasAction::Add {
        index: index.to_string(),
        alias: alias.to_string(),
    }])
}

/// Move `alias` from `old_index` to `new_index` in one atomic request.
pub fn alias_switch_body(alias: &str, new_index: &str, old_index: &str) -> OrderedMap {
    aliases_body(&[
        AliasAction::Add {
            index: new_index.to_string(),
            alias: alias.to_string(),
        },
        AliasAction::Remove {
            index: old_index.to_string(),
            alias: alias.to_string(),
        },
    ])
}
