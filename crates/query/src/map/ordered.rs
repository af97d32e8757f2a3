// crates/query/src/map/ordered.rs

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt::{self, Display, Formatter};

use super::encode;
use super::value::Value;

/// A key-value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct KvPair {
    pub key: String,
    pub value: Value,
}

impl KvPair {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Display for KvPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        encode::append_value(&mut buf, &self.value);
        write!(f, "{}: {}", self.key, String::from_utf8_lossy(&buf))
    }
}

/// An associative array that keeps insertion order.
///
/// This is a plain list of pairs, not a hash map: member order in the rendered
/// JSON is exactly the order of `push` calls, nested maps included. Duplicate
/// keys are neither checked nor merged; `get` returns the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedMap {
    pairs: Vec<KvPair>,
}

impl OrderedMap {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
        }
    }

    /// Append a pair at the end.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.pairs.push(KvPair::new(key, value));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Move all pairs of `other` to the end of this map, in order.
    pub fn append(&mut self, other: OrderedMap) {
        self.pairs.extend(other.pairs);
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.pairs.iter().find(|p| p.key == key).map(|p| &p.value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|p| p.key.as_str())
    }

    pub fn pairs(&self) -> &[KvPair] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<KvPair> {
        self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append the JSON form of this map to `buf`.
    pub fn append_json(&self, buf: &mut Vec<u8>) {
        buf.push(b'{');
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                buf.push(b',');
            }
            encode::append_str(buf, &pair.key);
            buf.push(b':');
            encode::append_value(buf, &pair.value);
        }
        buf.push(b'}');
    }

    /// The JSON representation of the map.
    pub fn render(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(100);
        self.append_json(&mut buf);
        buf
    }

    pub fn to_json_string(&self) -> String {
        // The encoder only ever writes UTF-8.
        String::from_utf8_lossy(&self.render()).into_owned()
    }
}

impl Display for OrderedMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.push(k, v);
        }
    }
}

impl IntoIterator for OrderedMap {
    type Item = KvPair;
    type IntoIter = std::vec::IntoIter<KvPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedMap {
    type Item = &'a KvPair;
    type IntoIter = std::slice::Iter<'a, KvPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl Serialize for OrderedMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for pair in &self.pairs {
            map.serialize_entry(&pair.key, &pair.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use serde_json::json;
    use uuid::Uuid;

    fn year_two() -> chrono::DateTime<Utc> {
        NaiveDate::from_ymd_opt(2, 1, 1)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap()
            .and_utc()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn render_scalars_in_insertion_order() {
        let m = ordered_map! {
            "a" => 1234,
            "b" => 12.34,
            "c" => true,
            "d" => "abcdefgh",
        };

        assert_eq!(
            m.to_json_string(),
            r#"{"a":1234,"b":1.234e+01,"c":true,"d":"abcdefgh"}"#
        );
    }

    #[test]
    fn render_every_value_kind() {
        let id = Uuid::parse_str("52eab613-58a6-498c-8947-781eeba0011d").unwrap();
        let m = ordered_map! {
            "a" => 1234,
            "b" => 12.34,
            "c" => true,
            "d" => "abcdefgh",
            "e" => year_two(),
            "f" => vec![Value::from("abcd"), Value::from(1234)],
            "g" => ordered_map! { "a" => 1, "b" => "2" },
            "h" => vec!["hello world"],
            "k" => vec![id],
        };

        let out = m.render();
        assert_eq!(
            String::from_utf8(out.clone()).unwrap(),
            concat!(
                r#"{"a":1234,"b":1.234e+01,"c":true,"d":"abcdefgh","#,
                r#""e":"0002-01-01T01:00:00Z","f":["abcd",1234],"g":{"a":1,"b":"2"},"#,
                r#""h":["hello world"],"k":["52eab613-58a6-498c-8947-781eeba0011d"]}"#
            )
        );

        let parsed: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
        assert_eq!(parsed["g"], json!({ "a": 1, "b": "2" }));
        assert_eq!(parsed["b"], json!(12.34));
    }

    #[test]
    fn render_empty_map() {
        assert_eq!(OrderedMap::new().render(), b"{}");
    }

    #[test]
    fn render_keeps_duplicate_keys() {
        let m = ordered_map! { "a" => 1, "a" => 2 };
        assert_eq!(m.to_json_string(), r#"{"a":1,"a":2}"#);
        assert_eq!(m.get("a"), Some(&Value::Int(1)));
    }

    #[test]
    fn render_escapes_keys() {
        let m = ordered_map! { "we\"ird" => "line\nbreak" };
        assert_eq!(m.to_json_string(), r#"{"we\"ird":"line\nbreak"}"#);
    }

    #[test]
    fn render_matches_serde_structure() {
        let m = ordered_map! {
            "z" => 1,
            "y" => ordered_map! { "inner" => vec!["x", "y"] },
            "x" => -0.5f32,
        };

        let ours: serde_json::Value = serde_json::from_slice(&m.render()).unwrap();
        let reference = serde_json::to_value(&m).unwrap();
        assert_eq!(ours, reference);
    }

    #[test]
    fn raw_key_order_equals_insertion_order() {
        let m: OrderedMap = vec![("zeta", 1), ("alpha", 2), ("mid", 3)]
            .into_iter()
            .collect();
        let s = m.to_json_string();
        let z = s.find("zeta").unwrap();
        let a = s.find("alpha").unwrap();
        let mid = s.find("mid").unwrap();
        assert!(z < a && a < mid);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Container behaviour
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn append_concatenates_pairs() {
        let mut left = ordered_map! { "a" => 1 };
        left.append(ordered_map! { "b" => 2, "c" => 3 });
        let keys: Vec<&str> = left.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(left.len(), 3);
    }

    #[test]
    fn with_builder_and_display() {
        let m = OrderedMap::new().with("k", "v");
        assert_eq!(format!("{}", m), r#"{"k":"v"}"#);
        assert_eq!(format!("{}", m.pairs()[0]), r#"k: "v""#);
    }
}
