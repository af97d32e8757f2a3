/// Builds an [`OrderedMap`](crate::OrderedMap) from `key => value` pairs,
/// keeping the written order.
///
/// ```
/// use query::ordered_map;
///
/// let m = ordered_map! { "a" => 1, "b" => "two" };
/// assert_eq!(m.to_json_string(), r#"{"a":1,"b":"two"}"#);
/// ```
#[macro_export]
macro_rules! ordered_map {
    () => {
        $crate::map::OrderedMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::map::OrderedMap::new();
        $(map.push($key, $value);)+
        map
    }};
}
