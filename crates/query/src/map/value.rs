// crates/query/src/map/value.rs

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value as Json;
use uuid::Uuid;

use super::ordered::OrderedMap;
use crate::error::Error;

/// The closed set of value kinds the JSON encoder knows how to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Uuid(Uuid),
    Time(DateTime<Utc>),
    Strings(Vec<String>),
    List(Vec<Value>),
    Map(OrderedMap),
}

impl Value {
    /// Short name of the kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Uuid(_) => "uuid",
            Value::Time(_) => "time",
            Value::Strings(_) => "strings",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&OrderedMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Render this value alone as JSON bytes.
    pub fn render(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(32);
        super::encode::append_value(&mut buf, self);
        buf
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions into Value
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Time(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::Strings(v)
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::Strings(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<Uuid>> for Value {
    fn from(v: Vec<Uuid>) -> Self {
        Value::List(v.into_iter().map(Value::Uuid).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<OrderedMap> for Value {
    fn from(v: OrderedMap) -> Self {
        Value::Map(v)
    }
}

/// Foreign JSON enters the closed value set here. `null` and unsigned
/// integers beyond `i64::MAX` have no encoding and are rejected.
impl TryFrom<Json> for Value {
    type Error = Error;

    fn try_from(json: Json) -> Result<Self, Self::Error> {
        match json {
            Json::Null => Err(Error::UnknownValueKind("null".into())),
            Json::Bool(b) => Ok(Value::Bool(b)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if n.is_u64() {
                    Err(Error::UnknownValueKind(format!(
                        "unsigned integer {} out of range",
                        n
                    )))
                } else {
                    n.as_f64()
                        .map(Value::Float64)
                        .ok_or_else(|| Error::UnknownValueKind(format!("number {}", n)))
                }
            }
            Json::String(s) => Ok(Value::String(s)),
            Json::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Json::Object(obj) => {
                let mut map = OrderedMap::with_capacity(obj.len());
                for (k, v) in obj {
                    map.push(k, Value::try_from(v)?);
                }
                Ok(Value::Map(map))
            }
        }
    }
}

impl TryFrom<&Json> for Value {
    type Error = Error;

    fn try_from(json: &Json) -> Result<Self, Self::Error> {
        Value::try_from(json.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// serde
// ─────────────────────────────────────────────────────────────────────────────

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float32(f) => serializer.serialize_f32(*f),
            Value::Float64(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Uuid(u) => serializer.collect_str(&u.hyphenated()),
            Value::Time(t) => serializer.serialize_str(&super::encode::format_time(t)),
            Value::Strings(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for s in items {
                    seq.serialize_element(s)?;
                }
                seq.end()
            }
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for v in items {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            Value::Map(m) => m.serialize(serializer),
        }
    }
}
